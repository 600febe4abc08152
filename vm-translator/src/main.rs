use std::env;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use vm_translator::code_writer::CodeWriter;
use vm_translator::parser::{Command, Parser};
use vm_translator::VmError;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <input.vm | directory>", args[0]);
        std::process::exit(1);
    }

    if let Err(e) = run(&args[1]) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(input: &str) -> Result<(), VmError> {
    let path = Path::new(input);
    let (vm_files, output_path, is_directory) = if path.is_dir() {
        let mut files: Vec<PathBuf> = fs::read_dir(path)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("vm"))
            .collect();
        files.sort();
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("Output");
        (files, path.join(format!("{name}.asm")), true)
    } else {
        (vec![path.to_path_buf()], path.with_extension("asm"), false)
    };

    let out_file = File::create(&output_path)?;
    let mut writer = CodeWriter::new(BufWriter::with_capacity(8192, out_file));

    if is_directory {
        writer.write_init()?;
    }

    for vm_file in &vm_files {
        translate_file(vm_file, &mut writer)?;
    }

    writer.flush()?;
    println!(
        "Translation complete: {} -> {}",
        input,
        output_path.display()
    );
    Ok(())
}

fn translate_file<W: std::io::Write>(
    vm_file: &Path,
    writer: &mut CodeWriter<W>,
) -> Result<(), VmError> {
    let path_str = vm_file.to_string_lossy();
    let mut parser = Parser::new(&path_str)?;
    writer.set_filename(&path_str);

    while parser.has_more_commands() {
        parser.advance();
        match parser.command()? {
            Command::Arithmetic(op) => writer.write_arithmetic(op.as_str())?,
            Command::Push { segment, index } => {
                writer.write_push_pop(true, segment.as_str(), index)?;
            }
            Command::Pop { segment, index } => {
                writer.write_push_pop(false, segment.as_str(), index)?;
            }
            Command::Label(label) => writer.write_label(label)?,
            Command::Goto(label) => writer.write_goto(label)?,
            Command::IfGoto(label) => writer.write_if(label)?,
            Command::Function { name, locals } => writer.write_function(name, locals)?,
            Command::Call { name, args } => writer.write_call(name, args)?,
            Command::Return => writer.write_return()?,
        }
    }
    Ok(())
}
