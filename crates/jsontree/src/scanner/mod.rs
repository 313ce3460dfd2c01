//! Scanner: byte-level tokenizer for the JSON-with-comments dialect.
//!
//! The scanner walks the whole input buffer (slice length is the only
//! terminator) and keeps exactly one token of lookahead, which is what the
//! recursive-descent grammar needs. Structurally it is the classic DFA over
//! START / NUMBER_BODY / STRING_BODY / ESCAPE / SLASH / LINE_COMMENT /
//! BLOCK_COMMENT / BLOCK_STAR, written as straight-line loops per token class
//! instead of a state variable.
//!
//! Policy split with the parser:
//! - keywords are matched byte-by-byte and fail at the first diverging byte;
//! - string escapes are *validated* here (`\` must introduce one of
//!   `"\/bfnrtu`, and `\u` must be followed by 4 hex digits) but not decoded;
//! - numbers are delimited against the JSON number grammar here, while float
//!   conversion and overflow detection happen in the parser;
//! - whitespace and (optionally) comments are skipped as inter-token trivia.
//!
//! Every token records the 1-based line/column of its first byte; columns
//! count characters, not bytes.


use core::fmt;

use crate::error::{Error, ScanError};

/// Kind of a scanned token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Colon,
    Number,
    String,
    True,
    False,
    Null,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Comma => "','",
            TokenKind::Colon => "':'",
            TokenKind::Number => "a number",
            TokenKind::String => "a string",
            TokenKind::True => "'true'",
            TokenKind::False => "'false'",
            TokenKind::Null => "'null'",
            TokenKind::Eof => "end of input",
        })
    }
}

/// One token: kind plus its exact byte range (trivia trimmed) and position.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) line: u32,
    pub(crate) column: u32,
}

#[derive(Debug)]
pub(crate) struct Scanner<'src> {
    input: &'src [u8],
    pos: usize,
    line: u32,
    column: u32,
    allow_comments: bool,
    token: Token,
}

impl<'src> Scanner<'src> {
    /// Creates a scanner and pre-scans the first token.
    pub(crate) fn new(input: &'src [u8], allow_comments: bool) -> Result<Self, Error> {
        let mut scanner = Scanner {
            input,
            pos: 0,
            line: 1,
            column: 1,
            allow_comments,
            token: Token {
                kind: TokenKind::Eof,
                start: 0,
                end: 0,
                line: 1,
                column: 1,
            },
        };
        scanner.advance()?;
        Ok(scanner)
    }

    /// The current lookahead token.
    pub(crate) fn lookahead(&self) -> Token {
        self.token
    }

    /// The exact source bytes of a token.
    pub(crate) fn text(&self, token: Token) -> &'src [u8] {
        &self.input[token.start..token.end]
    }

    /// Scans the next token into the lookahead slot.
    pub(crate) fn advance(&mut self) -> Result<(), Error> {
        self.skip_trivia()?;
        let (line, column) = (self.line, self.column);
        let start = self.pos;
        let kind = match self.peek() {
            None => TokenKind::Eof,
            Some(b'{') => self.punct(TokenKind::LBrace),
            Some(b'}') => self.punct(TokenKind::RBrace),
            Some(b'[') => self.punct(TokenKind::LBracket),
            Some(b']') => self.punct(TokenKind::RBracket),
            Some(b',') => self.punct(TokenKind::Comma),
            Some(b':') => self.punct(TokenKind::Colon),
            Some(b't') => {
                self.keyword(b"true")?;
                TokenKind::True
            }
            Some(b'f') => {
                self.keyword(b"false")?;
                TokenKind::False
            }
            Some(b'n') => {
                self.keyword(b"null")?;
                TokenKind::Null
            }
            Some(b'"') => {
                self.string_body(line, column)?;
                TokenKind::String
            }
            Some(b'-' | b'0'..=b'9') => {
                self.number_body()?;
                TokenKind::Number
            }
            Some(_) => return Err(self.unexpected_char()),
        };
        self.token = Token {
            kind,
            start,
            end: self.pos,
            line,
            column,
        };
        Ok(())
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        if byte == b'\n' {
            self.line += 1;
            self.column = 1;
        } else if byte & 0xC0 != 0x80 {
            // Count characters, not bytes: UTF-8 continuation bytes do not
            // advance the column.
            self.column += 1;
        }
        Some(byte)
    }

    fn punct(&mut self, kind: TokenKind) -> TokenKind {
        self.bump();
        kind
    }

    fn err(&self, kind: ScanError, line: u32, column: u32) -> Error {
        Error::Scan { kind, line, column }
    }

    fn err_here(&self, kind: ScanError) -> Error {
        self.err(kind, self.line, self.column)
    }

    fn unexpected_char(&self) -> Error {
        let (ch, _) = bstr::decode_utf8(&self.input[self.pos..]);
        self.err_here(ScanError::UnexpectedCharacter(
            ch.unwrap_or(char::REPLACEMENT_CHARACTER),
        ))
    }

    /// Skips whitespace and, when enabled, `//` and `/* */` comments.
    fn skip_trivia(&mut self) -> Result<(), Error> {
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\r' | b'\n') => {
                    self.bump();
                }
                Some(b'/') if self.allow_comments => self.skip_comment()?,
                _ => return Ok(()),
            }
        }
    }

    fn skip_comment(&mut self) -> Result<(), Error> {
        let (line, column) = (self.line, self.column);
        self.bump(); // the opening '/'
        match self.peek() {
            Some(b'/') => {
                while let Some(byte) = self.bump() {
                    if byte == b'\n' {
                        break;
                    }
                }
                Ok(())
            }
            Some(b'*') => {
                self.bump();
                loop {
                    match self.bump() {
                        None => return Err(self.err(ScanError::UnterminatedComment, line, column)),
                        Some(b'*') if self.peek() == Some(b'/') => {
                            self.bump();
                            return Ok(());
                        }
                        Some(_) => {}
                    }
                }
            }
            Some(_) => {
                let (ch, _) = bstr::decode_utf8(&self.input[self.pos..]);
                Err(self.err_here(ScanError::InvalidCommentStart(
                    ch.unwrap_or(char::REPLACEMENT_CHARACTER),
                )))
            }
            None => Err(self.err(ScanError::UnexpectedCharacter('/'), line, column)),
        }
    }

    /// Matches a keyword byte-for-byte; the error points at the first byte
    /// that diverged.
    fn keyword(&mut self, literal: &[u8]) -> Result<(), Error> {
        for &expected in literal {
            match self.peek() {
                Some(byte) if byte == expected => {
                    self.bump();
                }
                _ => return Err(self.err_here(ScanError::InvalidLiteral)),
            }
        }
        Ok(())
    }

    /// Scans a string body, validating (not decoding) escapes.
    fn string_body(&mut self, line: u32, column: u32) -> Result<(), Error> {
        self.bump(); // opening quote
        loop {
            match self.bump() {
                None => return Err(self.err(ScanError::UnterminatedString, line, column)),
                Some(b'"') => return Ok(()),
                Some(b'\\') => {
                    let (esc_line, esc_column) = (self.line, self.column);
                    match self.bump() {
                        None => return Err(self.err(ScanError::UnterminatedString, line, column)),
                        Some(
                            b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't',
                        ) => {}
                        Some(b'u') => {
                            for _ in 0..4 {
                                match self.peek() {
                                    Some(byte) if byte.is_ascii_hexdigit() => {
                                        self.bump();
                                    }
                                    _ => {
                                        return Err(
                                            self.err_here(ScanError::InvalidUnicodeEscape)
                                        );
                                    }
                                }
                            }
                        }
                        Some(other) => {
                            return Err(self.err(
                                ScanError::InvalidEscape(char::from(other)),
                                esc_line,
                                esc_column,
                            ));
                        }
                    }
                }
                Some(_) => {}
            }
        }
    }

    /// Delimits a number against the JSON number grammar: optional `-`, then
    /// `0` or a nonzero-digit run, optional fraction, optional exponent.
    fn number_body(&mut self) -> Result<(), Error> {
        if self.peek() == Some(b'-') {
            self.bump();
        }
        match self.peek() {
            Some(b'0') => {
                self.bump();
            }
            Some(b'1'..=b'9') => {
                self.digit_run();
            }
            _ => return Err(self.err_here(ScanError::InvalidNumber)),
        }
        if self.peek() == Some(b'.') {
            self.bump();
            self.require_digit()?;
            self.digit_run();
        }
        if let Some(b'e' | b'E') = self.peek() {
            self.bump();
            if let Some(b'+' | b'-') = self.peek() {
                self.bump();
            }
            self.require_digit()?;
            self.digit_run();
        }
        Ok(())
    }

    fn require_digit(&mut self) -> Result<(), Error> {
        match self.peek() {
            Some(byte) if byte.is_ascii_digit() => Ok(()),
            _ => Err(self.err_here(ScanError::InvalidNumber)),
        }
    }

    fn digit_run(&mut self) {
        while let Some(byte) = self.peek() {
            if !byte.is_ascii_digit() {
                break;
            }
            self.bump();
        }
    }
}
