//! Parser for Hack VM commands.
//!
//! Mirrors `hack-assembler::parser::ParserLines`'s advance/accessor shape,
//! but dispatches on a tagged [`Command`] rather than a stringly-typed
//! `command_type`/`arg1`/`arg2` triple.

use crate::error::VmError;
use std::fs::File;
use std::io::{BufRead, BufReader};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Local,
    Argument,
    This,
    That,
    Constant,
    Static,
    Pointer,
    Temp,
}

impl Segment {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Argument => "argument",
            Self::This => "this",
            Self::That => "that",
            Self::Constant => "constant",
            Self::Static => "static",
            Self::Pointer => "pointer",
            Self::Temp => "temp",
        }
    }

    fn parse(s: &str) -> Result<Self, VmError> {
        match s {
            "local" => Ok(Self::Local),
            "argument" => Ok(Self::Argument),
            "this" => Ok(Self::This),
            "that" => Ok(Self::That),
            "constant" => Ok(Self::Constant),
            "static" => Ok(Self::Static),
            "pointer" => Ok(Self::Pointer),
            "temp" => Ok(Self::Temp),
            _ => Err(VmError::UnknownSegment(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Neg,
    Eq,
    Gt,
    Lt,
    And,
    Or,
    Not,
}

impl ArithOp {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Neg => "neg",
            Self::Eq => "eq",
            Self::Gt => "gt",
            Self::Lt => "lt",
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
        }
    }

    fn parse(s: &str) -> Result<Self, VmError> {
        match s {
            "add" => Ok(Self::Add),
            "sub" => Ok(Self::Sub),
            "neg" => Ok(Self::Neg),
            "eq" => Ok(Self::Eq),
            "gt" => Ok(Self::Gt),
            "lt" => Ok(Self::Lt),
            "and" => Ok(Self::And),
            "or" => Ok(Self::Or),
            "not" => Ok(Self::Not),
            _ => Err(VmError::UnknownArithmetic(s.to_string())),
        }
    }
}

/// A single parsed VM command, borrowing its symbolic names from the
/// parser's current line.
#[derive(Debug, Clone)]
pub enum Command<'a> {
    Arithmetic(ArithOp),
    Push { segment: Segment, index: u16 },
    Pop { segment: Segment, index: u16 },
    Label(&'a str),
    Goto(&'a str),
    IfGoto(&'a str),
    Function { name: &'a str, locals: u16 },
    Call { name: &'a str, args: u16 },
    Return,
}

pub struct Parser {
    lines: Vec<String>,
    current_line: usize,
    current_command: String,
    cached_parts: Vec<String>,
}

impl Parser {
    pub fn new(filename: &str) -> Result<Self, VmError> {
        let file = File::open(filename)?;
        let reader = BufReader::new(file);

        let mut lines = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let line = if let Some(pos) = line.find("//") {
                &line[..pos]
            } else {
                &line
            };
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                lines.push(trimmed.to_string());
            }
        }

        Ok(Self {
            lines,
            current_line: 0,
            current_command: String::new(),
            cached_parts: Vec::new(),
        })
    }

    /// Builds a parser directly from in-memory lines, for tests that don't
    /// want to round-trip through the filesystem.
    #[must_use]
    pub fn from_lines(lines: &[&str]) -> Self {
        let cleaned = lines
            .iter()
            .map(|line| {
                let line = if let Some(pos) = line.find("//") {
                    &line[..pos]
                } else {
                    line
                };
                line.trim().to_string()
            })
            .filter(|line| !line.is_empty())
            .collect();

        Self {
            lines: cleaned,
            current_line: 0,
            current_command: String::new(),
            cached_parts: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn has_more_commands(&self) -> bool {
        self.current_line < self.lines.len()
    }

    #[inline]
    pub fn advance(&mut self) {
        if self.has_more_commands() {
            std::mem::swap(
                &mut self.current_command,
                &mut self.lines[self.current_line],
            );

            self.cached_parts.clear();
            self.cached_parts.extend(
                self.current_command
                    .split_whitespace()
                    .map(ToString::to_string),
            );

            self.current_line += 1;
        }
    }

    /// Parses the current cached parts into a tagged [`Command`].
    ///
    /// # Errors
    /// Returns an error if the command keyword, segment, or arithmetic
    /// mnemonic is unrecognized, or a required numeric argument is missing
    /// or malformed.
    pub fn command(&self) -> Result<Command<'_>, VmError> {
        let parts = &self.cached_parts;
        let keyword = parts
            .first()
            .ok_or_else(|| VmError::MalformedCommand(self.current_command.clone()))?
            .as_str();

        match keyword {
            "push" | "pop" => {
                let segment = Segment::parse(self.part(1, keyword)?)?;
                let index = self.numeric_arg(2, keyword)?;
                if keyword == "push" {
                    Ok(Command::Push { segment, index })
                } else {
                    Ok(Command::Pop { segment, index })
                }
            }
            "label" => Ok(Command::Label(self.part(1, keyword)?)),
            "goto" => Ok(Command::Goto(self.part(1, keyword)?)),
            "if-goto" => Ok(Command::IfGoto(self.part(1, keyword)?)),
            "function" => Ok(Command::Function {
                name: self.part(1, keyword)?,
                locals: self.numeric_arg(2, keyword)?,
            }),
            "call" => Ok(Command::Call {
                name: self.part(1, keyword)?,
                args: self.numeric_arg(2, keyword)?,
            }),
            "return" => Ok(Command::Return),
            arith => Ok(Command::Arithmetic(ArithOp::parse(arith)?)),
        }
    }

    fn part(&self, index: usize, command: &str) -> Result<&str, VmError> {
        self.cached_parts
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| VmError::InvalidArgument {
                command: command.to_string(),
                value: String::new(),
            })
    }

    fn numeric_arg(&self, index: usize, command: &str) -> Result<u16, VmError> {
        let raw = self.part(index, command)?;
        raw.parse().map_err(|_| VmError::InvalidArgument {
            command: command.to_string(),
            value: raw.to_string(),
        })
    }
}
