//! Single-pass lexer for Jack source.
//!
//! Eagerly materializes the whole token stream, then exposes
//! `advance`/`current`/`peek`, mirroring `hack-assembler::parser::ParserLines`'s
//! advance-then-accessor shape rather than a lazy iterator — Jack source
//! files are small enough that eager tokenization is simpler and faster.

use crate::error::{CompileError, CompileErrorKind};
use crate::token::{KEYWORDS, Token, TokenKind, is_symbol_char};
use std::iter::Peekable;
use std::str::Chars;

pub struct Tokenizer {
    tokens: Vec<Token>,
    position: usize,
}

impl Tokenizer {
    /// Tokenizes an entire source string up front.
    ///
    /// # Errors
    /// Returns a `CompileError` on an unterminated string, an unterminated
    /// block comment, or an integer constant greater than 32767.
    pub fn tokenize(file: &str, source: &str) -> Result<Self, CompileError> {
        let tokens = lex(file, source)?;
        Ok(Self {
            tokens,
            position: 0,
        })
    }

    #[inline]
    #[must_use]
    pub fn has_more_tokens(&self) -> bool {
        self.position < self.tokens.len()
    }

    #[inline]
    pub fn advance(&mut self) {
        self.position += 1;
    }

    #[inline]
    #[must_use]
    pub fn current(&self) -> Option<&Token> {
        self.position
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
    }

    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

fn lex(file: &str, source: &str) -> Result<Vec<Token>, CompileError> {
    let mut tokens = Vec::new();
    let mut chars: Peekable<Chars> = source.chars().peekable();
    let mut line = 1usize;

    while let Some(&c) = chars.peek() {
        match c {
            '\n' => {
                line += 1;
                chars.next();
            }
            c if c.is_whitespace() => {
                chars.next();
            }
            '/' => {
                chars.next();
                match chars.peek() {
                    Some('/') => {
                        chars.next();
                        for c in chars.by_ref() {
                            if c == '\n' {
                                line += 1;
                                break;
                            }
                        }
                    }
                    Some('*') => {
                        chars.next();
                        let mut closed = false;
                        while let Some(c) = chars.next() {
                            if c == '\n' {
                                line += 1;
                            }
                            if c == '*' && chars.peek() == Some(&'/') {
                                chars.next();
                                closed = true;
                                break;
                            }
                        }
                        if !closed {
                            return Err(CompileError::new(
                                file,
                                Some(line),
                                CompileErrorKind::UnterminatedComment,
                            ));
                        }
                    }
                    _ => tokens.push(Token {
                        kind: TokenKind::Symbol('/'),
                        line,
                    }),
                }
            }
            '"' => {
                chars.next();
                let mut value = String::new();
                let start_line = line;
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '"' {
                        closed = true;
                        break;
                    }
                    if c == '\n' {
                        break;
                    }
                    value.push(c);
                }
                if !closed {
                    return Err(CompileError::new(
                        file,
                        Some(start_line),
                        CompileErrorKind::UnterminatedString,
                    ));
                }
                tokens.push(Token {
                    kind: TokenKind::StringConst(value),
                    line: start_line,
                });
            }
            c if is_symbol_char(c) => {
                chars.next();
                tokens.push(Token {
                    kind: TokenKind::Symbol(c),
                    line,
                });
            }
            c if c.is_ascii_digit() => {
                let mut digits = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_ascii_digit() {
                        digits.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value: i64 = digits.parse().unwrap_or(i64::MAX);
                if value > i64::from(u16::MAX >> 1) {
                    return Err(CompileError::new(
                        file,
                        Some(line),
                        CompileErrorKind::IntegerOutOfRange(value),
                    ));
                }
                #[allow(clippy::cast_possible_truncation)]
                tokens.push(Token {
                    kind: TokenKind::IntConst(value as u16),
                    line,
                });
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut ident = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_alphanumeric() || c == '_' {
                        ident.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let kind = KEYWORDS
                    .get(ident.as_str())
                    .map_or_else(|| TokenKind::Identifier(ident.clone()), |kw| TokenKind::Keyword(*kw));
                tokens.push(Token { kind, line });
            }
            _ => {
                // Any other character is swallowed rather than treated as a
                // token; Jack source is ASCII identifiers/symbols/strings.
                chars.next();
            }
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Keyword;

    #[test]
    fn tokenizes_class_skeleton() {
        let tok = Tokenizer::tokenize("Test.jack", "class Main { }").unwrap();
        let kinds: Vec<_> = tok.tokens().iter().map(|t| t.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Keyword(Keyword::Class),
                TokenKind::Identifier("Main".to_string()),
                TokenKind::Symbol('{'),
                TokenKind::Symbol('}'),
            ]
        );
    }

    #[test]
    fn strips_line_and_block_comments() {
        let tok = Tokenizer::tokenize(
            "Test.jack",
            "// header\nclass /* inline */ Main {}",
        )
        .unwrap();
        let kinds: Vec<_> = tok.tokens().iter().map(|t| t.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Keyword(Keyword::Class),
                TokenKind::Identifier("Main".to_string()),
                TokenKind::Symbol('{'),
                TokenKind::Symbol('}'),
            ]
        );
    }

    #[test]
    fn rejects_integer_above_32767() {
        let err = Tokenizer::tokenize("Test.jack", "32768").unwrap_err();
        assert!(matches!(
            err.kind,
            CompileErrorKind::IntegerOutOfRange(32768)
        ));
    }

    #[test]
    fn rejects_unterminated_string() {
        let err = Tokenizer::tokenize("Test.jack", "\"abc").unwrap_err();
        assert!(matches!(err.kind, CompileErrorKind::UnterminatedString));
    }

    #[test]
    fn rejects_unterminated_block_comment() {
        let err = Tokenizer::tokenize("Test.jack", "/* never closed").unwrap_err();
        assert!(matches!(err.kind, CompileErrorKind::UnterminatedComment));
    }

    #[test]
    fn advance_and_current_walk_the_stream() {
        let mut tok = Tokenizer::tokenize("Test.jack", "let x = 1 ;").unwrap();
        assert!(tok.has_more_tokens());
        tok.advance();
        assert_eq!(tok.current().unwrap().kind, TokenKind::Keyword(Keyword::Let));
        assert_eq!(
            tok.peek().unwrap().kind,
            TokenKind::Identifier("x".to_string())
        );
    }
}
