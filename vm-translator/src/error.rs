//! Error types for the VM translator.
//!
//! Hand-rolled `std::error::Error` impls, matching `hack-assembler`'s
//! `ParserError` — no `thiserror`/`anyhow` dependency.

use std::fmt;

#[derive(Debug)]
pub enum VmError {
    Io(std::io::Error),
    UnknownSegment(String),
    UnknownArithmetic(String),
    MalformedCommand(String),
    InvalidArgument { command: String, value: String },
}

impl std::error::Error for VmError {}

impl fmt::Display for VmError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {e}"),
            Self::UnknownSegment(s) => write!(f, "unknown segment: {s}"),
            Self::UnknownArithmetic(c) => write!(f, "unknown arithmetic command: {c}"),
            Self::MalformedCommand(line) => write!(f, "malformed command: {line}"),
            Self::InvalidArgument { command, value } => {
                write!(f, "invalid argument `{value}` for command `{command}`")
            }
        }
    }
}

impl From<std::io::Error> for VmError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error)
    }
}
