//! End-to-end translation scenarios, driven through the public library API
//! over in-memory buffers rather than a golden-fixture comparison harness
//! (enumerating and diffing external `.vm`/`.asm` fixture pairs is out of
//! scope for this crate).

use vm_translator::code_writer::CodeWriter;
use vm_translator::parser::{Command, Parser};

fn translate(filename: &str, lines: &[&str]) -> String {
    let mut parser = Parser::from_lines(lines);
    let mut out = Vec::new();
    let mut writer = CodeWriter::new(&mut out);
    writer.set_filename(filename);

    while parser.has_more_commands() {
        parser.advance();
        match parser.command().unwrap() {
            Command::Arithmetic(op) => writer.write_arithmetic(op.as_str()).unwrap(),
            Command::Push { segment, index } => {
                writer.write_push_pop(true, segment.as_str(), index).unwrap();
            }
            Command::Pop { segment, index } => {
                writer.write_push_pop(false, segment.as_str(), index).unwrap();
            }
            Command::Label(label) => writer.write_label(label).unwrap(),
            Command::Goto(label) => writer.write_goto(label).unwrap(),
            Command::IfGoto(label) => writer.write_if(label).unwrap(),
            Command::Function { name, locals } => writer.write_function(name, locals).unwrap(),
            Command::Call { name, args } => writer.write_call(name, args).unwrap(),
            Command::Return => writer.write_return().unwrap(),
        }
    }
    writer.flush().unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn push_constant_add_produces_the_expected_operand_sequence() {
    let asm = translate("Main", &["push constant 7", "push constant 8", "add"]);
    assert!(asm.contains("@7"));
    assert!(asm.contains("@8"));
    assert!(asm.contains("D+M"));
}

#[test]
fn eq_and_lt_each_allocate_a_distinct_label_pair() {
    let asm = translate("Main", &["eq", "lt"]);
    assert!(asm.contains("(EQ0)"));
    assert!(asm.contains("(ENDEQ0)"));
    assert!(asm.contains("(LT1)"));
    assert!(asm.contains("(ENDLT1)"));
}

#[test]
fn static_segment_is_scoped_per_source_file() {
    let foo_asm = translate("Foo", &["push constant 1", "pop static 0"]);
    let bar_asm = translate("Bar", &["push constant 2", "pop static 0"]);
    assert!(foo_asm.contains("@Foo.0"));
    assert!(bar_asm.contains("@Bar.0"));
    assert!(!foo_asm.contains("Bar.0"));
}

#[test]
fn labels_are_qualified_by_their_enclosing_function() {
    let asm = translate(
        "Main",
        &[
            "function Main.loop 0",
            "label LOOP",
            "goto LOOP",
            "if-goto LOOP",
        ],
    );
    assert!(asm.contains("(Main.loop$LOOP)"));
    assert!(asm.contains("@Main.loop$LOOP"));
}

#[test]
fn function_reserves_locals_as_zeroed_words() {
    let asm = translate("Main", &["function Main.run 3"]);
    assert!(asm.contains("(Main.run)"));
    assert_eq!(asm.matches("@0\nD=A\n").count(), 3);
}

#[test]
fn call_pushes_a_return_address_and_repositions_arg_and_lcl() {
    let asm = translate("Main", &["call Main.helper 2"]);
    assert!(asm.contains("@Main.helper$ret.0"));
    assert!(asm.contains("(Main.helper$ret.0)"));
    assert!(asm.contains("@ARG"));
    assert!(asm.contains("@LCL"));
}

#[test]
fn return_restores_segments_from_the_saved_frame_before_jumping() {
    let asm = translate("Main", &["return"]);
    assert!(asm.contains("@LCL"));
    assert!(asm.contains("@R13"));
    assert!(asm.contains("@R14"));
    assert!(asm.contains("0;JMP"));
}

#[test]
fn rejects_push_to_an_unknown_segment() {
    let mut parser = Parser::from_lines(&["push nowhere 0"]);
    parser.advance();
    assert!(parser.command().is_err());
}
