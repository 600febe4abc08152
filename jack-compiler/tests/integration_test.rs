//! End-to-end compilation scenarios, driven through the public library API
//! over in-memory buffers rather than a golden-fixture comparison harness.

use jack_compiler::compile_source;
use jack_compiler::error::CompileErrorKind;

fn compile(source: &str) -> String {
    let mut out = Vec::new();
    compile_source("Test.jack", source, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn main_class_with_output_print_int_compiles_to_a_function_and_a_call() {
    let vm = compile(
        "class Main { \
           function void main() { \
             do Output.printInt(1 + (2 * 3)); \
             return; \
           } \
         }",
    );
    assert!(vm.starts_with("function Main.main 0\n"));
    assert!(vm.contains("push constant 1"));
    assert!(vm.contains("push constant 2"));
    assert!(vm.contains("push constant 3"));
    assert!(vm.contains("call Math.multiply 2"));
    assert!(vm.contains("add"));
    assert!(vm.contains("call Output.printInt 1"));
    assert!(vm.contains("pop temp 0"));
    assert!(vm.ends_with("push constant 0\nreturn\n"));
}

#[test]
fn array_store_round_trips_through_temp_zero() {
    let vm = compile(
        "class Main { \
           function void main() { \
             var Array a; \
             let a[2] = 17; \
             return; \
           } \
         }",
    );
    let lines: Vec<&str> = vm.lines().collect();
    let temp_pos = lines.iter().position(|l| *l == "pop temp 0").unwrap();
    assert_eq!(lines[temp_pos + 1], "pop pointer 1");
    assert_eq!(lines[temp_pos + 2], "push temp 0");
    assert_eq!(lines[temp_pos + 3], "pop that 0");
}

#[test]
fn field_variables_use_separate_counters_from_static_variables() {
    let vm = compile(
        "class Counter { \
           static int total; \
           field int value; \
           constructor Counter new() { let value = 0; return this; } \
           method void bump() { let value = value + 1; let total = total + 1; return; } \
         }",
    );
    assert!(vm.contains("function Counter.new 0"));
    assert!(vm.contains("function Counter.bump 0"));
    assert!(vm.contains("pop this 0"));
    assert!(vm.contains("pop static 0"));
}

#[test]
fn method_call_chain_uses_the_callees_declared_type() {
    let vm = compile(
        "class Main { \
           function void main() { \
             var Point p; \
             let p = Point.new(0, 0); \
             do p.getX(); \
             return; \
           } \
         }",
    );
    assert!(vm.contains("call Point.new 2"));
    assert!(vm.contains("call Point.getX 1"));
}

#[test]
fn nested_if_while_label_counters_do_not_collide_across_subroutines() {
    let vm = compile(
        "class Main { \
           function void a() { if (true) { return; } return; } \
           function void b() { if (true) { return; } return; } \
         }",
    );
    assert_eq!(vm.matches("label IF_TRUE0").count(), 2);
}

#[test]
fn unterminated_string_reports_a_lexical_error_with_the_file_name() {
    let mut out = Vec::new();
    let err = compile_source("Broken.jack", "class C { function void f() { do x(\"oops); } }", &mut out)
        .unwrap_err();
    assert_eq!(err.file, "Broken.jack");
    assert!(matches!(err.kind, CompileErrorKind::UnterminatedString));
}

#[test]
fn integer_literal_over_32767_is_a_fatal_error() {
    let mut out = Vec::new();
    let err = compile_source(
        "Broken.jack",
        "class C { function void f() { return 40000; } }",
        &mut out,
    )
    .unwrap_err();
    assert!(matches!(err.kind, CompileErrorKind::IntegerOutOfRange(40000)));
}
