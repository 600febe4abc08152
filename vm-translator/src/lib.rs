//! Hack VM Translator for the `Nand2Tetris` course
//!
//! Translates stack-machine VM commands (arithmetic, memory access,
//! branching, function call/return) into Hack assembly.
//!
//! # Architecture
//!
//! - [`parser`]: turns `.vm` source lines into tagged [`parser::Command`]s
//! - [`code_writer`]: emits Hack assembly for each command
//! - [`error`]: the crate's error type
//!
//! # Example
//!
//! ```rust
//! use vm_translator::code_writer::CodeWriter;
//!
//! let mut out = Vec::new();
//! let mut writer = CodeWriter::new(&mut out);
//! writer.set_filename("Main");
//! writer.write_push_pop(true, "constant", 7).unwrap();
//! writer.write_push_pop(true, "constant", 8).unwrap();
//! writer.write_arithmetic("add").unwrap();
//! writer.flush().unwrap();
//! ```

#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::inline_always,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod code_writer;
pub mod error;
pub mod parser;

pub use error::VmError;
pub use parser::{Command, Parser};
