//! The two-pass assembly pipeline shared by `main` and the integration tests.
//!
//! Keeping this here (rather than private to the binary) means the binary's
//! actual label/symbol/encoding path is what gets exercised by tests, not a
//! second hand-written copy of it.

use std::io::Write;

use crate::parser::{CommandType, ParserError, ParserLines};
use crate::symbol_table::SymbolTable;
use crate::code;

/// First pass: builds the symbol table with label addresses.
///
/// Scans through all lines and records the ROM address of each label.
/// Label definitions (L-commands) don't generate code, so they don't
/// increment the ROM address counter.
pub fn first_pass(lines: &[String], symbol_table: &mut SymbolTable) -> Result<(), ParserError> {
    let mut rom_address = 0u16;
    let mut parser = ParserLines::from_lines(lines);

    while parser.advance() {
        match parser.command_type()? {
            CommandType::LCommand => {
                let symbol = parser.symbol()?;
                symbol_table.add_entry(symbol, rom_address);
            }
            CommandType::ACommand | CommandType::CCommand => {
                rom_address += 1;
            }
        }
    }

    Ok(())
}

/// Second pass: generates machine code.
///
/// Translates each instruction to binary:
/// - A-commands: resolve symbols to addresses.
/// - C-commands: encode dest, comp, and jump fields.
/// - L-commands: produce no output (already processed in pass 1).
pub fn second_pass<W: Write>(
    lines: &[String],
    symbol_table: &mut SymbolTable,
    writer: &mut W,
) -> Result<(), ParserError> {
    let mut ram_address = 16u16; // Variables start at RAM[16]
    let mut parser = ParserLines::from_lines(lines);

    while parser.advance() {
        match parser.command_type()? {
            CommandType::ACommand => {
                let symbol = parser.symbol()?;

                let address = symbol
                    .parse::<u16>()
                    .unwrap_or_else(|_| symbol_table.get_or_insert(symbol, &mut ram_address));

                let instruction = code::encode_a_instruction(address);
                writeln!(writer, "{instruction}")?;
            }
            CommandType::CCommand => {
                let dest = parser.dest()?.unwrap_or("");
                let comp = parser.comp()?.unwrap_or("");
                let jump = parser.jump()?.unwrap_or("");

                let instruction = code::encode_c_instruction(dest, comp, jump);
                writeln!(writer, "{instruction}")?;
            }
            CommandType::LCommand => {}
        }
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_produces_no_output_and_resolves_to_its_own_rom_address() {
        let lines: Vec<String> = ["(LOOP)", "@LOOP", "D=D+1", "@LOOP", "D;JNE"]
            .iter()
            .map(|s| (*s).to_string())
            .collect();

        let mut symbols = SymbolTable::new();
        first_pass(&lines, &mut symbols).unwrap();

        let mut out = Vec::new();
        second_pass(&lines, &mut symbols, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let emitted: Vec<&str> = text.lines().collect();

        assert_eq!(emitted.len(), 4);
        assert_eq!(emitted[0], "0000000000000000"); // @LOOP -> ROM 0
        assert_eq!(emitted[2], "0000000000000000"); // @LOOP -> ROM 0 again
    }
}
