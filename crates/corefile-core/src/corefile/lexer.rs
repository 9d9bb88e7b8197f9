//! Corefile tokenizer
//!
//! Tokens are whitespace separated. A `#` at the start of a token begins a
//! comment running to the end of the line. Double-quoted tokens keep their
//! quotes and backslash escapes verbatim so they serialize back unchanged.
//! Only a standalone `{` or `}` is a brace token; a brace attached to a word
//! stays part of it and the parser decides whether it opens a body.
//!
//! Copyright (c) 2025 Corefile Migration Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use std::iter::Peekable;
use std::str::Chars;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    OpenBrace,
    CloseBrace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// Line the token starts on (1-based)
    pub line: usize,
}

impl Token {
    fn new(kind: TokenKind, text: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
        }
    }
}

/// Corefile tokenizer
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
        }
    }

    /// Consume the whole input
    pub fn tokenize(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();
            match self.current_char() {
                None => break,
                Some('#') => self.skip_comment(),
                Some('"') => {
                    let line = self.line;
                    let text = self.read_quoted()?;
                    tokens.push(Token::new(TokenKind::Word, text, line));
                }
                Some(_) => {
                    let line = self.line;
                    let text = self.read_bare();
                    let kind = match text.as_str() {
                        "{" => TokenKind::OpenBrace,
                        "}" => TokenKind::CloseBrace,
                        _ => TokenKind::Word,
                    };
                    tokens.push(Token::new(kind, text, line));
                }
            }
        }

        Ok(tokens)
    }

    fn current_char(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.next();
        if ch == Some('\n') {
            self.line += 1;
        }
        ch
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.current_char(), Some(ch) if ch.is_whitespace()) {
            self.advance();
        }
    }

    fn skip_comment(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn read_quoted(&mut self) -> Result<String> {
        let start_line = self.line;
        let mut text = String::new();
        if let Some(quote) = self.advance() {
            text.push(quote);
        }

        loop {
            match self.advance() {
                None => return Err(Error::syntax(start_line, "unterminated quoted string")),
                Some('\\') => {
                    text.push('\\');
                    match self.advance() {
                        Some(escaped) => text.push(escaped),
                        None => {
                            return Err(Error::syntax(start_line, "unterminated quoted string"))
                        }
                    }
                }
                Some('"') => {
                    text.push('"');
                    return Ok(text);
                }
                Some(ch) => text.push(ch),
            }
        }
    }

    fn read_bare(&mut self) -> String {
        let mut text = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                break;
            }
            text.push(ch);
            self.advance();
        }
        text
    }
}

/// Tokenize Corefile text
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    Lexer::new(input).tokenize()
}
