//! Recursive-descent Jack compiler.
//!
//! Grammar-driven, LL(1) with a single token of lookahead for `term`
//! (distinguishing a bare variable from an array access or a subroutine
//! call). No AST is materialized — VM commands are emitted to a buffered
//! [`VMWriter`] as productions are recognized.

use crate::error::{CompileError, CompileErrorKind};
use crate::symbol_table::{SymbolTable, VarKind};
use crate::token::{Keyword, TokenKind};
use crate::tokenizer::Tokenizer;
use crate::vm_writer::VMWriter;
use std::io::{self, Write};

/// Compiles one `.jack` source file (one class) to VM bytecode text.
///
/// # Errors
/// Returns a `CompileError` on any lexical, syntactic, or semantic failure,
/// or an I/O failure writing to `out`.
pub fn compile_source<W: Write>(file: &str, source: &str, out: W) -> Result<(), CompileError> {
    let tokenizer = Tokenizer::tokenize(file, source)?;
    let mut compiler = Compiler {
        tokenizer,
        writer: VMWriter::new(out),
        symbols: SymbolTable::new(),
        class_name: String::new(),
        file: file.to_string(),
        if_counter: 0,
        while_counter: 0,
    };
    compiler.compile_class()?;
    compiler.writer.flush().map_err(|e| compiler.io_err(e))
}

struct Compiler<W: Write> {
    tokenizer: Tokenizer,
    writer: VMWriter<W>,
    symbols: SymbolTable,
    class_name: String,
    file: String,
    /// Per-subroutine `if` label counter, reset at each `compile_subroutine`.
    if_counter: usize,
    /// Per-subroutine `while` label counter, reset at each `compile_subroutine`.
    while_counter: usize,
}

impl<W: Write> Compiler<W> {
    fn io_err(&self, e: io::Error) -> CompileError {
        CompileError::new(self.file.clone(), self.current_line(), CompileErrorKind::Io(e))
    }

    fn err(&self, kind: CompileErrorKind) -> CompileError {
        CompileError::new(self.file.clone(), self.current_line(), kind)
    }

    fn current_line(&self) -> Option<usize> {
        self.tokenizer.current().map(|t| t.line)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.tokenizer.peek().map(|t| t.kind.clone())
    }

    fn advance(&mut self) -> Result<TokenKind, CompileError> {
        self.tokenizer.advance();
        self.tokenizer
            .current()
            .map(|t| t.kind.clone())
            .ok_or_else(|| self.err(CompileErrorKind::UnexpectedEof))
    }

    fn expect_symbol(&mut self, expected: char) -> Result<(), CompileError> {
        match self.advance()? {
            TokenKind::Symbol(c) if c == expected => Ok(()),
            other => Err(self.err(CompileErrorKind::UnexpectedToken {
                expected: format!("'{expected}'"),
                found: format!("{other:?}"),
            })),
        }
    }

    fn expect_keyword(&mut self, expected: Keyword) -> Result<(), CompileError> {
        match self.advance()? {
            TokenKind::Keyword(k) if k == expected => Ok(()),
            other => Err(self.err(CompileErrorKind::UnexpectedToken {
                expected: format!("{expected:?}"),
                found: format!("{other:?}"),
            })),
        }
    }

    fn expect_identifier(&mut self) -> Result<String, CompileError> {
        match self.advance()? {
            TokenKind::Identifier(name) => Ok(name),
            other => Err(self.err(CompileErrorKind::UnexpectedToken {
                expected: "identifier".to_string(),
                found: format!("{other:?}"),
            })),
        }
    }

    fn compile_type(&mut self) -> Result<String, CompileError> {
        match self.advance()? {
            TokenKind::Keyword(Keyword::Int) => Ok("int".to_string()),
            TokenKind::Keyword(Keyword::Char) => Ok("char".to_string()),
            TokenKind::Keyword(Keyword::Boolean) => Ok("boolean".to_string()),
            TokenKind::Identifier(name) => Ok(name),
            other => Err(self.err(CompileErrorKind::UnexpectedToken {
                expected: "a type".to_string(),
                found: format!("{other:?}"),
            })),
        }
    }

    fn compile_class(&mut self) -> Result<(), CompileError> {
        self.expect_keyword(Keyword::Class)?;
        self.class_name = self.expect_identifier()?;
        self.expect_symbol('{')?;

        while matches!(
            self.peek_kind(),
            Some(TokenKind::Keyword(Keyword::Static | Keyword::Field))
        ) {
            self.compile_class_var_dec()?;
        }

        while matches!(
            self.peek_kind(),
            Some(TokenKind::Keyword(
                Keyword::Constructor | Keyword::Function | Keyword::Method
            ))
        ) {
            self.compile_subroutine()?;
        }

        self.expect_symbol('}')
    }

    fn compile_class_var_dec(&mut self) -> Result<(), CompileError> {
        let kind = match self.advance()? {
            TokenKind::Keyword(Keyword::Static) => VarKind::Static,
            TokenKind::Keyword(Keyword::Field) => VarKind::Field,
            other => {
                return Err(self.err(CompileErrorKind::UnexpectedToken {
                    expected: "'static' or 'field'".to_string(),
                    found: format!("{other:?}"),
                }));
            }
        };
        let ty = self.compile_type()?;
        let name = self.expect_identifier()?;
        self.symbols.define(&name, &ty, kind);

        while matches!(self.peek_kind(), Some(TokenKind::Symbol(','))) {
            self.advance()?;
            let name = self.expect_identifier()?;
            self.symbols.define(&name, &ty, kind);
        }

        self.expect_symbol(';')
    }

    fn compile_subroutine(&mut self) -> Result<(), CompileError> {
        self.symbols.start_subroutine();
        self.if_counter = 0;
        self.while_counter = 0;

        let subroutine_kind = match self.advance()? {
            TokenKind::Keyword(k @ (Keyword::Constructor | Keyword::Function | Keyword::Method)) => k,
            other => {
                return Err(self.err(CompileErrorKind::UnexpectedToken {
                    expected: "a subroutine kind".to_string(),
                    found: format!("{other:?}"),
                }));
            }
        };

        if subroutine_kind == Keyword::Method {
            let class_name = self.class_name.clone();
            self.symbols.define("this", &class_name, VarKind::Argument);
        }

        match self.peek_kind() {
            Some(TokenKind::Keyword(Keyword::Void)) => {
                self.advance()?;
            }
            _ => {
                self.compile_type()?;
            }
        }

        let name = self.expect_identifier()?;
        let full_name = format!("{}.{name}", self.class_name);

        self.expect_symbol('(')?;
        self.compile_parameter_list()?;
        self.expect_symbol(')')?;

        self.expect_symbol('{')?;
        while matches!(self.peek_kind(), Some(TokenKind::Keyword(Keyword::Var))) {
            self.compile_var_dec()?;
        }

        let nlocals = self.symbols.var_count(VarKind::Local);
        self.writer
            .write_function(&full_name, nlocals)
            .map_err(|e| self.io_err(e))?;

        match subroutine_kind {
            Keyword::Constructor => {
                let nfields = self.symbols.var_count(VarKind::Field);
                self.writer
                    .write_push("constant", nfields)
                    .map_err(|e| self.io_err(e))?;
                self.writer
                    .write_call("Memory.alloc", 1)
                    .map_err(|e| self.io_err(e))?;
                self.writer
                    .write_pop("pointer", 0)
                    .map_err(|e| self.io_err(e))?;
            }
            Keyword::Method => {
                self.writer
                    .write_push("argument", 0)
                    .map_err(|e| self.io_err(e))?;
                self.writer
                    .write_pop("pointer", 0)
                    .map_err(|e| self.io_err(e))?;
            }
            _ => {}
        }

        self.compile_statements()?;
        self.expect_symbol('}')
    }

    fn compile_parameter_list(&mut self) -> Result<(), CompileError> {
        if matches!(self.peek_kind(), Some(TokenKind::Symbol(')'))) {
            return Ok(());
        }
        loop {
            let ty = self.compile_type()?;
            let name = self.expect_identifier()?;
            self.symbols.define(&name, &ty, VarKind::Argument);
            if matches!(self.peek_kind(), Some(TokenKind::Symbol(','))) {
                self.advance()?;
            } else {
                break;
            }
        }
        Ok(())
    }

    fn compile_var_dec(&mut self) -> Result<(), CompileError> {
        self.expect_keyword(Keyword::Var)?;
        let ty = self.compile_type()?;
        let name = self.expect_identifier()?;
        self.symbols.define(&name, &ty, VarKind::Local);

        while matches!(self.peek_kind(), Some(TokenKind::Symbol(','))) {
            self.advance()?;
            let name = self.expect_identifier()?;
            self.symbols.define(&name, &ty, VarKind::Local);
        }

        self.expect_symbol(';')
    }

    fn compile_statements(&mut self) -> Result<(), CompileError> {
        loop {
            match self.peek_kind() {
                Some(TokenKind::Keyword(Keyword::Let)) => self.compile_let()?,
                Some(TokenKind::Keyword(Keyword::If)) => self.compile_if()?,
                Some(TokenKind::Keyword(Keyword::While)) => self.compile_while()?,
                Some(TokenKind::Keyword(Keyword::Do)) => self.compile_do()?,
                Some(TokenKind::Keyword(Keyword::Return)) => self.compile_return()?,
                _ => break,
            }
        }
        Ok(())
    }

    fn compile_let(&mut self) -> Result<(), CompileError> {
        self.expect_keyword(Keyword::Let)?;
        let name = self.expect_identifier()?;

        if matches!(self.peek_kind(), Some(TokenKind::Symbol('['))) {
            self.advance()?;
            self.compile_expression()?;
            self.expect_symbol(']')?;
            self.push_variable(&name)?;
            self.writer
                .write_arithmetic("add")
                .map_err(|e| self.io_err(e))?;

            self.expect_symbol('=')?;
            self.compile_expression()?;
            self.expect_symbol(';')?;

            self.writer
                .write_pop("temp", 0)
                .map_err(|e| self.io_err(e))?;
            self.writer
                .write_pop("pointer", 1)
                .map_err(|e| self.io_err(e))?;
            self.writer
                .write_push("temp", 0)
                .map_err(|e| self.io_err(e))?;
            self.writer
                .write_pop("that", 0)
                .map_err(|e| self.io_err(e))?;
        } else {
            self.expect_symbol('=')?;
            self.compile_expression()?;
            self.expect_symbol(';')?;
            self.pop_variable(&name)?;
        }
        Ok(())
    }

    fn compile_if(&mut self) -> Result<(), CompileError> {
        self.expect_keyword(Keyword::If)?;
        self.expect_symbol('(')?;
        self.compile_expression()?;
        self.expect_symbol(')')?;

        let n = self.if_counter;
        self.if_counter += 1;
        let true_label = format!("IF_TRUE{n}");
        let false_label = format!("IF_FALSE{n}");
        let end_label = format!("IF_END{n}");

        self.writer.write_if(&true_label).map_err(|e| self.io_err(e))?;
        self.writer
            .write_goto(&false_label)
            .map_err(|e| self.io_err(e))?;
        self.writer
            .write_label(&true_label)
            .map_err(|e| self.io_err(e))?;

        self.expect_symbol('{')?;
        self.compile_statements()?;
        self.expect_symbol('}')?;

        if matches!(self.peek_kind(), Some(TokenKind::Keyword(Keyword::Else))) {
            self.writer
                .write_goto(&end_label)
                .map_err(|e| self.io_err(e))?;
            self.writer
                .write_label(&false_label)
                .map_err(|e| self.io_err(e))?;
            self.advance()?;
            self.expect_symbol('{')?;
            self.compile_statements()?;
            self.expect_symbol('}')?;
            self.writer
                .write_label(&end_label)
                .map_err(|e| self.io_err(e))?;
        } else {
            self.writer
                .write_label(&false_label)
                .map_err(|e| self.io_err(e))?;
        }
        Ok(())
    }

    fn compile_while(&mut self) -> Result<(), CompileError> {
        self.expect_keyword(Keyword::While)?;

        let n = self.while_counter;
        self.while_counter += 1;
        let exp_label = format!("WHILE_EXP{n}");
        let end_label = format!("WHILE_END{n}");

        self.writer
            .write_label(&exp_label)
            .map_err(|e| self.io_err(e))?;
        self.expect_symbol('(')?;
        self.compile_expression()?;
        self.expect_symbol(')')?;
        self.writer
            .write_arithmetic("not")
            .map_err(|e| self.io_err(e))?;
        self.writer
            .write_if(&end_label)
            .map_err(|e| self.io_err(e))?;

        self.expect_symbol('{')?;
        self.compile_statements()?;
        self.expect_symbol('}')?;

        self.writer
            .write_goto(&exp_label)
            .map_err(|e| self.io_err(e))?;
        self.writer
            .write_label(&end_label)
            .map_err(|e| self.io_err(e))
    }

    fn compile_do(&mut self) -> Result<(), CompileError> {
        self.expect_keyword(Keyword::Do)?;
        self.compile_subroutine_call()?;
        self.expect_symbol(';')?;
        self.writer.write_pop("temp", 0).map_err(|e| self.io_err(e))
    }

    fn compile_return(&mut self) -> Result<(), CompileError> {
        self.expect_keyword(Keyword::Return)?;
        if matches!(self.peek_kind(), Some(TokenKind::Symbol(';'))) {
            self.writer
                .write_push("constant", 0)
                .map_err(|e| self.io_err(e))?;
        } else {
            self.compile_expression()?;
        }
        self.expect_symbol(';')?;
        self.writer.write_return().map_err(|e| self.io_err(e))
    }

    fn compile_subroutine_call(&mut self) -> Result<(), CompileError> {
        let name = self.expect_identifier()?;
        self.compile_call_tail(&name)
    }

    /// Given an identifier already consumed, compiles the `(args)` or
    /// `.member(args)` tail of a subroutine call, dispatching bare/method/
    /// function calls per the three subroutine-call rules.
    fn compile_call_tail(&mut self, name: &str) -> Result<(), CompileError> {
        match self.peek_kind() {
            Some(TokenKind::Symbol('(')) => {
                self.writer
                    .write_push("pointer", 0)
                    .map_err(|e| self.io_err(e))?;
                self.advance()?;
                let nargs = self.compile_expression_list()?;
                self.expect_symbol(')')?;
                self.writer
                    .write_call(&format!("{}.{name}", self.class_name), nargs + 1)
                    .map_err(|e| self.io_err(e))
            }
            Some(TokenKind::Symbol('.')) => {
                self.advance()?;
                let member = self.expect_identifier()?;
                self.expect_symbol('(')?;
                if let Some(kind) = self.symbols.kind_of(name) {
                    let index = self.symbols.index_of(name).unwrap();
                    let ty = self.symbols.type_of(name).unwrap().to_string();
                    self.writer
                        .write_push(kind.segment(), index)
                        .map_err(|e| self.io_err(e))?;
                    let nargs = self.compile_expression_list()?;
                    self.expect_symbol(')')?;
                    self.writer
                        .write_call(&format!("{ty}.{member}"), nargs + 1)
                        .map_err(|e| self.io_err(e))
                } else {
                    let nargs = self.compile_expression_list()?;
                    self.expect_symbol(')')?;
                    self.writer
                        .write_call(&format!("{name}.{member}"), nargs)
                        .map_err(|e| self.io_err(e))
                }
            }
            other => Err(self.err(CompileErrorKind::UnexpectedToken {
                expected: "'(' or '.'".to_string(),
                found: format!("{other:?}"),
            })),
        }
    }

    fn compile_expression_list(&mut self) -> Result<u16, CompileError> {
        if matches!(self.peek_kind(), Some(TokenKind::Symbol(')'))) {
            return Ok(0);
        }
        let mut count = 1u16;
        self.compile_expression()?;
        while matches!(self.peek_kind(), Some(TokenKind::Symbol(','))) {
            self.advance()?;
            self.compile_expression()?;
            count += 1;
        }
        Ok(count)
    }

    fn compile_expression(&mut self) -> Result<(), CompileError> {
        self.compile_term()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Symbol(c)) if is_binary_op(c) => c,
                _ => break,
            };
            self.advance()?;
            self.compile_term()?;
            self.emit_binary_op(op)?;
        }
        Ok(())
    }

    fn emit_binary_op(&mut self, op: char) -> Result<(), CompileError> {
        let result = match op {
            '+' => self.writer.write_arithmetic("add"),
            '-' => self.writer.write_arithmetic("sub"),
            '&' => self.writer.write_arithmetic("and"),
            '|' => self.writer.write_arithmetic("or"),
            '<' => self.writer.write_arithmetic("lt"),
            '>' => self.writer.write_arithmetic("gt"),
            '=' => self.writer.write_arithmetic("eq"),
            '*' => self.writer.write_call("Math.multiply", 2),
            '/' => self.writer.write_call("Math.divide", 2),
            _ => unreachable!("is_binary_op gates the operator set"),
        };
        result.map_err(|e| self.io_err(e))
    }

    fn compile_term(&mut self) -> Result<(), CompileError> {
        match self.advance()? {
            TokenKind::IntConst(v) => {
                self.writer.write_push("constant", v).map_err(|e| self.io_err(e))
            }
            TokenKind::StringConst(s) => self.compile_string_const(&s),
            TokenKind::Keyword(Keyword::True) => {
                self.writer
                    .write_push("constant", 0)
                    .map_err(|e| self.io_err(e))?;
                self.writer.write_arithmetic("not").map_err(|e| self.io_err(e))
            }
            TokenKind::Keyword(Keyword::False | Keyword::Null) => self
                .writer
                .write_push("constant", 0)
                .map_err(|e| self.io_err(e)),
            TokenKind::Keyword(Keyword::This) => {
                self.writer.write_push("pointer", 0).map_err(|e| self.io_err(e))
            }
            TokenKind::Symbol('(') => {
                self.compile_expression()?;
                self.expect_symbol(')')
            }
            TokenKind::Symbol(c @ ('-' | '~')) => {
                self.compile_term()?;
                let op = if c == '-' { "neg" } else { "not" };
                self.writer.write_arithmetic(op).map_err(|e| self.io_err(e))
            }
            TokenKind::Identifier(name) => self.compile_identifier_term(&name),
            other => Err(self.err(CompileErrorKind::UnexpectedToken {
                expected: "a term".to_string(),
                found: format!("{other:?}"),
            })),
        }
    }

    fn compile_identifier_term(&mut self, name: &str) -> Result<(), CompileError> {
        match self.peek_kind() {
            Some(TokenKind::Symbol('[')) => {
                self.advance()?;
                self.compile_expression()?;
                self.expect_symbol(']')?;
                self.push_variable(name)?;
                self.writer
                    .write_arithmetic("add")
                    .map_err(|e| self.io_err(e))?;
                self.writer
                    .write_pop("pointer", 1)
                    .map_err(|e| self.io_err(e))?;
                self.writer
                    .write_push("that", 0)
                    .map_err(|e| self.io_err(e))
            }
            Some(TokenKind::Symbol('(') | TokenKind::Symbol('.')) => self.compile_call_tail(name),
            _ => self.push_variable(name),
        }
    }

    fn compile_string_const(&mut self, s: &str) -> Result<(), CompileError> {
        #[allow(clippy::cast_possible_truncation)]
        let len = s.len() as u16;
        self.writer
            .write_push("constant", len)
            .map_err(|e| self.io_err(e))?;
        self.writer
            .write_call("String.new", 1)
            .map_err(|e| self.io_err(e))?;
        for c in s.chars() {
            self.writer
                .write_push("constant", c as u16)
                .map_err(|e| self.io_err(e))?;
            self.writer
                .write_call("String.appendChar", 2)
                .map_err(|e| self.io_err(e))?;
        }
        Ok(())
    }

    fn push_variable(&mut self, name: &str) -> Result<(), CompileError> {
        let kind = self
            .symbols
            .kind_of(name)
            .ok_or_else(|| self.err(CompileErrorKind::UnknownIdentifier(name.to_string())))?;
        let index = self.symbols.index_of(name).unwrap();
        self.writer
            .write_push(kind.segment(), index)
            .map_err(|e| self.io_err(e))
    }

    fn pop_variable(&mut self, name: &str) -> Result<(), CompileError> {
        let kind = self
            .symbols
            .kind_of(name)
            .ok_or_else(|| self.err(CompileErrorKind::UnknownIdentifier(name.to_string())))?;
        let index = self.symbols.index_of(name).unwrap();
        self.writer
            .write_pop(kind.segment(), index)
            .map_err(|e| self.io_err(e))
    }
}

fn is_binary_op(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/' | '&' | '|' | '<' | '>' | '=')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(source: &str) -> String {
        let mut out = Vec::new();
        compile_source("Test.jack", source, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn compiles_a_void_function_with_a_return() {
        let vm = compile("class Main { function void main() { return; } }");
        assert_eq!(vm, "function Main.main 0\npush constant 0\nreturn\n");
    }

    #[test]
    fn compiles_arithmetic_left_to_right_with_no_precedence() {
        let vm = compile(
            "class Main { function int add() { return 1 + 2 * 3; } }",
        );
        assert!(vm.contains("push constant 1"));
        assert!(vm.contains("push constant 2"));
        assert!(vm.contains("push constant 3"));
        assert!(vm.contains("call Math.multiply 2"));
        assert!(vm.contains("add"));
    }

    #[test]
    fn compiles_a_constructor_with_memory_alloc() {
        let vm = compile(
            "class Point { field int x; constructor Point new() { return this; } }",
        );
        assert!(vm.contains("function Point.new 0"));
        assert!(vm.contains("push constant 1"));
        assert!(vm.contains("call Memory.alloc 1"));
        assert!(vm.contains("pop pointer 0"));
    }

    #[test]
    fn compiles_a_method_with_this_as_argument_zero() {
        let vm = compile(
            "class Point { field int x; method int getX() { return x; } }",
        );
        assert!(vm.contains("function Point.getX 0"));
        assert!(vm.contains("push argument 0"));
        assert!(vm.contains("pop pointer 0"));
        assert!(vm.contains("push this 0"));
    }

    #[test]
    fn compiles_var_declarations_as_local_segment() {
        let vm = compile(
            "class Main { function void run() { var int i; let i = 5; return; } }",
        );
        assert!(vm.contains("function Main.run 1"));
        assert!(vm.contains("pop local 0"));
    }

    #[test]
    fn compiles_array_assignment_with_the_temp_hop() {
        let vm = compile(
            "class Main { function void run() { var Array a; let a[0] = 1; return; } }",
        );
        assert!(vm.contains("pop temp 0"));
        assert!(vm.contains("pop pointer 1"));
        assert!(vm.contains("push temp 0"));
        assert!(vm.contains("pop that 0"));
    }

    #[test]
    fn compiles_if_else_with_distinct_labels() {
        let vm = compile(
            "class Main { function void run() { var int a; if (true) { let a = 1; } else { let a = 2; } return; } }",
        );
        assert!(vm.contains("if-goto IF_TRUE0"));
        assert!(vm.contains("goto IF_FALSE0"));
        assert!(vm.contains("label IF_TRUE0"));
        assert!(vm.contains("goto IF_END0"));
        assert!(vm.contains("label IF_FALSE0"));
        assert!(vm.contains("label IF_END0"));
    }

    #[test]
    fn compiles_while_with_negated_condition() {
        let vm = compile(
            "class Main { function void run() { var int a; while (true) { let a = 1; } return; } }",
        );
        assert!(vm.contains("label WHILE_EXP0"));
        assert!(vm.contains("not"));
        assert!(vm.contains("if-goto WHILE_END0"));
        assert!(vm.contains("goto WHILE_EXP0"));
        assert!(vm.contains("label WHILE_END0"));
    }

    #[test]
    fn bare_call_pushes_pointer_zero_for_the_implicit_receiver() {
        let vm = compile(
            "class Main { function void run() { do helper(); return; } function void helper() { return; } }",
        );
        assert!(vm.contains("push pointer 0"));
        assert!(vm.contains("call Main.helper 1"));
    }

    #[test]
    fn function_call_on_a_class_name_pushes_no_implicit_receiver() {
        let vm = compile(
            "class Main { function void run() { do Output.println(); return; } }",
        );
        assert!(vm.contains("call Output.println 0"));
        assert!(!vm.contains("push pointer 0\ncall Output.println"));
    }

    #[test]
    fn method_call_on_a_known_variable_pushes_the_variable_first() {
        let vm = compile(
            "class Main { function void run() { var Point p; do p.getX(); return; } }",
        );
        assert!(vm.contains("push local 0"));
        assert!(vm.contains("call Point.getX 1"));
    }

    #[test]
    fn string_constant_builds_via_string_new_and_append_char() {
        let vm = compile(
            "class Main { function void run() { do Output.printString(\"hi\"); return; } }",
        );
        assert!(vm.contains("push constant 2"));
        assert!(vm.contains("call String.new 1"));
        assert!(vm.contains("call String.appendChar 2"));
    }

    #[test]
    fn rejects_reference_to_an_undeclared_variable() {
        let mut out = Vec::new();
        let err =
            compile_source("Test.jack", "class Main { function void run() { let q = 1; return; } }", &mut out)
                .unwrap_err();
        assert!(matches!(err.kind, CompileErrorKind::UnknownIdentifier(_)));
    }
}
