//! Emits Hack VM bytecode text, one command per line.

use std::io::{self, Write};

pub struct VMWriter<W: Write> {
    out: W,
}

impl<W: Write> VMWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn write_push(&mut self, segment: &str, index: u16) -> io::Result<()> {
        writeln!(self.out, "push {segment} {index}")
    }

    pub fn write_pop(&mut self, segment: &str, index: u16) -> io::Result<()> {
        writeln!(self.out, "pop {segment} {index}")
    }

    pub fn write_arithmetic(&mut self, command: &str) -> io::Result<()> {
        writeln!(self.out, "{command}")
    }

    pub fn write_label(&mut self, label: &str) -> io::Result<()> {
        writeln!(self.out, "label {label}")
    }

    pub fn write_goto(&mut self, label: &str) -> io::Result<()> {
        writeln!(self.out, "goto {label}")
    }

    pub fn write_if(&mut self, label: &str) -> io::Result<()> {
        writeln!(self.out, "if-goto {label}")
    }

    pub fn write_call(&mut self, name: &str, nargs: u16) -> io::Result<()> {
        writeln!(self.out, "call {name} {nargs}")
    }

    pub fn write_function(&mut self, name: &str, nlocals: u16) -> io::Result<()> {
        writeln!(self.out, "function {name} {nlocals}")
    }

    pub fn write_return(&mut self) -> io::Result<()> {
        writeln!(self.out, "return")
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_one_command_per_line() {
        let mut out = Vec::new();
        {
            let mut writer = VMWriter::new(&mut out);
            writer.write_push("constant", 7).unwrap();
            writer.write_call("Math.multiply", 2).unwrap();
            writer.write_return().unwrap();
            writer.flush().unwrap();
        }
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "push constant 7\ncall Math.multiply 2\nreturn\n");
    }
}
