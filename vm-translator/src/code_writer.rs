use crate::error::VmError;
use std::io::Write;

macro_rules! write_asm {
    ($writer:expr, $($line:literal)*) => {
        $writer.write_all(concat!($($line, "\n"),*).as_bytes())
    };
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Local,
    Argument,
    This,
    That,
    Temp,
    Pointer,
    Static,
    Constant,
}

impl Segment {
    fn base_symbol(self) -> &'static str {
        match self {
            Self::Local => "LCL",
            Self::Argument => "ARG",
            Self::This => "THIS",
            Self::That => "THAT",
            Self::Temp | Self::Pointer | Self::Static | Self::Constant => {
                unreachable!("indexed-register segments are handled separately")
            }
        }
    }
}

/// Translates parsed VM commands into Hack assembly, one `.asm` file per
/// `CodeWriter`. Arithmetic/push/pop mirror the teacher's `projetc7`
/// implementation; branching and the call/function/return protocol are
/// new.
pub struct CodeWriter<W: Write> {
    out: W,
    label_counter: usize,
    call_counter: usize,
    filename: String,
    current_function: String,
}

impl<W: Write> CodeWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            label_counter: 0,
            call_counter: 0,
            filename: String::new(),
            current_function: String::new(),
        }
    }

    #[inline]
    pub fn set_filename(&mut self, filename: &str) {
        let name = std::path::Path::new(filename)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Unknown");
        self.filename.clear();
        self.filename.push_str(name);
    }

    /// Emits the bootstrap prologue (`SP=256` then `call Sys.init 0`)
    /// through the normal call-emission path. Call once, before
    /// translating any file, when assembling a whole directory.
    pub fn write_init(&mut self) -> Result<(), VmError> {
        write_asm!(self.out,
            "// bootstrap"
            "@256"
            "D=A"
            "@SP"
            "M=D"
        )?;
        self.write_call("Sys.init", 0)
    }

    pub fn write_arithmetic(&mut self, command: &str) -> Result<(), VmError> {
        writeln!(self.out, "// {command}")?;
        match command {
            "add" => self.write_binary_op("D+M"),
            "sub" => self.write_binary_op("D-M"),
            "and" => self.write_binary_op("D&M"),
            "or" => self.write_binary_op("D|M"),
            "neg" => self.write_unary_op(true),
            "not" => self.write_unary_op(false),
            "eq" => self.write_comparison("JEQ"),
            "gt" => self.write_comparison("JGT"),
            "lt" => self.write_comparison("JLT"),
            other => Err(VmError::UnknownArithmetic(other.to_string())),
        }
    }

    #[inline]
    fn write_binary_op(&mut self, operation: &str) -> Result<(), VmError> {
        write!(
            self.out,
            "@SP\n\
             M=M-1\n\
             A=M\n\
             D=M\n\
             @R13\n\
             M=D\n\
             @SP\n\
             M=M-1\n\
             A=M\n\
             D=M\n\
             @R13\n\
             D={operation}\n",
        )?;
        // First pop (top of stack, R13) is the right-hand operand; the
        // second pop, left directly in D, is the left-hand one, so
        // `D={operation}` reads as `x op y` for the non-commutative ops.
        self.write_push_d()?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    #[inline]
    fn write_unary_op(&mut self, is_neg: bool) -> Result<(), VmError> {
        write_asm!(self.out,
            "@SP"
            "M=M-1"
            "A=M"
            "D=M"
        )?;
        if is_neg {
            write_asm!(self.out,
                "@0"
                "D=A-D"
            )?;
        } else {
            write_asm!(self.out, "D=!D")?;
        }
        self.write_push_d()?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    #[inline]
    fn write_comparison(&mut self, jump: &str) -> Result<(), VmError> {
        let label_prefix = match jump {
            "JEQ" => "EQ",
            "JGT" => "GT",
            "JLT" => "LT",
            _ => jump,
        };
        let n = self.label_counter;
        self.label_counter += 1;

        write!(
            self.out,
            "@SP\n\
             M=M-1\n\
             A=M\n\
             D=M\n\
             @R13\n\
             M=D\n\
             @SP\n\
             M=M-1\n\
             A=M\n\
             D=M\n\
             @R13\n\
             D=D-M\n\
             @{label_prefix}{n}\n\
             D;{jump}\n\
             @SP\n\
             A=M\n\
             M=0\n\
             @SP\n\
             M=M+1\n\
             @END{label_prefix}{n}\n\
             0;JMP\n\
             ({label_prefix}{n})\n\
             @SP\n\
             A=M\n\
             M=-1\n\
             @SP\n\
             M=M+1\n\
             (END{label_prefix}{n})\n\n",
        )?;
        Ok(())
    }

    pub fn write_push_pop(
        &mut self,
        is_push: bool,
        segment: &str,
        index: u16,
    ) -> Result<(), VmError> {
        let command = if is_push { "push" } else { "pop" };
        writeln!(self.out, "// {command} {segment} {index}")?;
        if is_push {
            self.write_push(segment, index)?;
        } else {
            self.write_pop(segment, index)?;
        }
        self.out.write_all(b"\n")?;
        Ok(())
    }

    fn parse_segment(segment: &str) -> Result<Segment, VmError> {
        match segment {
            "local" => Ok(Segment::Local),
            "argument" => Ok(Segment::Argument),
            "this" => Ok(Segment::This),
            "that" => Ok(Segment::That),
            "temp" => Ok(Segment::Temp),
            "pointer" => Ok(Segment::Pointer),
            "static" => Ok(Segment::Static),
            "constant" => Ok(Segment::Constant),
            other => Err(VmError::UnknownSegment(other.to_string())),
        }
    }

    #[inline]
    fn write_push(&mut self, segment: &str, index: u16) -> Result<(), VmError> {
        match Self::parse_segment(segment)? {
            Segment::Constant => {
                write!(self.out, "@{index}\nD=A\n")?;
                self.write_push_d()
            }
            seg @ (Segment::Local | Segment::Argument | Segment::This | Segment::That) => {
                write!(
                    self.out,
                    "@{}\nD=M\n@{index}\nA=D+A\nD=M\n",
                    seg.base_symbol()
                )?;
                self.write_push_d()
            }
            Segment::Temp => {
                write!(self.out, "@5\nD=A\n@{index}\nA=D+A\nD=M\n")?;
                self.write_push_d()
            }
            Segment::Pointer => {
                write!(self.out, "@THIS\nD=A\n@{index}\nA=D+A\nD=M\n")?;
                self.write_push_d()
            }
            Segment::Static => {
                write!(self.out, "@{}.{index}\nD=M\n", self.filename)?;
                self.write_push_d()
            }
        }
    }

    #[inline]
    fn write_pop(&mut self, segment: &str, index: u16) -> Result<(), VmError> {
        match Self::parse_segment(segment)? {
            seg @ (Segment::Local | Segment::Argument | Segment::This | Segment::That) => {
                write!(
                    self.out,
                    "@{}\nD=M\n@{index}\nD=D+A\n@R13\nM=D\n",
                    seg.base_symbol()
                )?;
                self.write_pop_to_d()?;
                write_asm!(self.out,
                    "@R13"
                    "A=M"
                    "M=D"
                )?;
                Ok(())
            }
            Segment::Temp => {
                write!(self.out, "@5\nD=A\n@{index}\nD=D+A\n@R13\nM=D\n")?;
                self.write_pop_to_d()?;
                write_asm!(self.out,
                    "@R13"
                    "A=M"
                    "M=D"
                )?;
                Ok(())
            }
            Segment::Pointer => {
                write!(self.out, "@THIS\nD=A\n@{index}\nD=D+A\n@R13\nM=D\n")?;
                self.write_pop_to_d()?;
                write_asm!(self.out,
                    "@R13"
                    "A=M"
                    "M=D"
                )?;
                Ok(())
            }
            Segment::Static => {
                self.write_pop_to_d()?;
                write!(self.out, "@{}.{index}\nM=D\n", self.filename)?;
                Ok(())
            }
            Segment::Constant => Err(VmError::InvalidArgument {
                command: "pop".to_string(),
                value: "constant".to_string(),
            }),
        }
    }

    #[inline]
    fn write_push_d(&mut self) -> Result<(), VmError> {
        write_asm!(self.out,
            "@SP"
            "A=M"
            "M=D"
            "@SP"
            "M=M+1"
        )?;
        Ok(())
    }

    #[inline]
    fn write_pop_to_d(&mut self) -> Result<(), VmError> {
        write_asm!(self.out,
            "@SP"
            "M=M-1"
            "A=M"
            "D=M"
        )?;
        Ok(())
    }

    fn qualify(&self, label: &str) -> String {
        if self.current_function.is_empty() {
            label.to_string()
        } else {
            format!("{}${label}", self.current_function)
        }
    }

    pub fn write_label(&mut self, label: &str) -> Result<(), VmError> {
        let qualified = self.qualify(label);
        writeln!(self.out, "({qualified})")?;
        Ok(())
    }

    pub fn write_goto(&mut self, label: &str) -> Result<(), VmError> {
        let qualified = self.qualify(label);
        write!(self.out, "@{qualified}\n0;JMP\n")?;
        Ok(())
    }

    pub fn write_if(&mut self, label: &str) -> Result<(), VmError> {
        let qualified = self.qualify(label);
        self.write_pop_to_d()?;
        write!(self.out, "@{qualified}\nD;JNE\n")?;
        Ok(())
    }

    /// `function f k`: emit `(f)`, record it as the current function, then
    /// reserve `k` locals by pushing zero words inline.
    pub fn write_function(&mut self, name: &str, locals: u16) -> Result<(), VmError> {
        writeln!(self.out, "({name})")?;
        self.current_function = name.to_string();
        for _ in 0..locals {
            write!(self.out, "@0\nD=A\n")?;
            self.write_push_d()?;
        }
        Ok(())
    }

    /// `call f n` per the standard Hack VM calling convention: push a
    /// unique return-address label, save the caller's segment pointers,
    /// reposition `ARG`/`LCL`, then jump.
    pub fn write_call(&mut self, name: &str, args: u16) -> Result<(), VmError> {
        let return_label = format!("{name}$ret.{}", self.call_counter);
        self.call_counter += 1;

        write!(self.out, "@{return_label}\nD=A\n")?;
        self.write_push_d()?;
        for segment in ["LCL", "ARG", "THIS", "THAT"] {
            write!(self.out, "@{segment}\nD=M\n")?;
            self.write_push_d()?;
        }
        write!(
            self.out,
            "@SP\n\
             D=M\n\
             @{}\n\
             D=D-A\n\
             @ARG\n\
             M=D\n\
             @SP\n\
             D=M\n\
             @LCL\n\
             M=D\n\
             @{name}\n\
             0;JMP\n\
             ({return_label})\n",
            args + 5,
        )?;
        Ok(())
    }

    /// `return`: tears down the callee's frame and jumps back to the
    /// saved return address, all computed off `FRAME` (`R13`) rather than
    /// the (by-then-overwritten) live segment pointers.
    pub fn write_return(&mut self) -> Result<(), VmError> {
        write_asm!(self.out,
            "@LCL"
            "D=M"
            "@R13"
            "M=D"
        )?;
        write_asm!(self.out,
            "@5"
            "A=D-A"
            "D=M"
            "@R14"
            "M=D"
        )?;
        self.write_pop_to_d()?;
        write_asm!(self.out,
            "@ARG"
            "A=M"
            "M=D"
        )?;
        write_asm!(self.out,
            "@ARG"
            "D=M+1"
            "@SP"
            "M=D"
        )?;
        for (offset, segment) in [(1, "THAT"), (2, "THIS"), (3, "ARG"), (4, "LCL")] {
            write!(
                self.out,
                "@R13\nD=M\n@{offset}\nA=D-A\nD=M\n@{segment}\nM=D\n",
            )?;
        }
        write_asm!(self.out,
            "@R14"
            "A=M"
            "0;JMP"
        )?;
        Ok(())
    }

    #[inline]
    pub fn flush(&mut self) -> Result<(), VmError> {
        self.out.flush()?;
        Ok(())
    }
}
