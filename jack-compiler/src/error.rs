//! Error types for the Jack compiler.
//!
//! Hand-rolled `std::error::Error` impls, matching `hack-assembler`'s
//! `ParserError` — no `thiserror`/`anyhow` dependency.

use std::fmt;

#[derive(Debug)]
pub enum CompileErrorKind {
    UnterminatedString,
    UnterminatedComment,
    IntegerOutOfRange(i64),
    UnexpectedToken { expected: String, found: String },
    UnexpectedEof,
    UnknownIdentifier(String),
    Io(std::io::Error),
}

impl fmt::Display for CompileErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::UnterminatedString => write!(f, "unterminated string constant"),
            Self::UnterminatedComment => write!(f, "unterminated block comment"),
            Self::IntegerOutOfRange(v) => write!(f, "integer constant {v} out of range (0..=32767)"),
            Self::UnexpectedToken { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            Self::UnexpectedEof => write!(f, "unexpected end of input"),
            Self::UnknownIdentifier(name) => write!(f, "unknown identifier: {name}"),
            Self::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

/// A fatal compilation error, tagged with the source file and, where
/// applicable, the line it was detected on.
#[derive(Debug)]
pub struct CompileError {
    pub file: String,
    pub line: Option<usize>,
    pub kind: CompileErrorKind,
}

impl CompileError {
    #[must_use]
    pub fn new(file: impl Into<String>, line: Option<usize>, kind: CompileErrorKind) -> Self {
        Self {
            file: file.into(),
            line,
            kind,
        }
    }
}

impl std::error::Error for CompileError {}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}: {}", self.file, line, self.kind),
            None => write!(f, "{}: {}", self.file, self.kind),
        }
    }
}
