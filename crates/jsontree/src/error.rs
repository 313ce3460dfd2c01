use alloc::string::String;

use thiserror::Error;

use crate::scanner::TokenKind;

/// Lexical errors, carried inside [`Error::Scan`] together with the position
/// of the offending byte.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanError {
    #[error("unexpected character {0:?}")]
    UnexpectedCharacter(char),
    /// A keyword (`true`/`false`/`null`) stopped matching. The position is the
    /// first byte that diverged, not the start of the keyword.
    #[error("malformed keyword literal")]
    InvalidLiteral,
    #[error("unterminated string")]
    UnterminatedString,
    #[error("invalid escape character {0:?}")]
    InvalidEscape(char),
    #[error("\\u escape requires exactly 4 hex digits")]
    InvalidUnicodeEscape,
    #[error("malformed number")]
    InvalidNumber,
    #[error("expected '/' or '*' after '/', found {0:?}")]
    InvalidCommentStart(char),
    #[error("unterminated block comment")]
    UnterminatedComment,
}

/// Everything that can go wrong while parsing, navigating, converting or
/// mutating a document.
///
/// Errors are raised synchronously at the point of detection and are fatal to
/// the operation in progress; the crate never substitutes a default value. A
/// failed mutation leaves the target document unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The scanner rejected the input before it formed a token.
    #[error("{kind} at {line}:{column}")]
    Scan {
        kind: ScanError,
        line: u32,
        column: u32,
    },

    /// The grammar required one specific token and found another.
    #[error("expected {expected} but found {found} at {line}:{column}")]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
        line: u32,
        column: u32,
    },

    /// The grammar required the start of a value, where several token kinds
    /// are legal, and found none of them.
    #[error("expected a value but found {found} at {line}:{column}")]
    ExpectedValue {
        found: TokenKind,
        line: u32,
        column: u32,
    },

    /// A number token is syntactically valid but does not fit a finite
    /// IEEE-754 double.
    #[error("number does not fit an IEEE-754 double at {line}:{column}")]
    NumberOverflow { line: u32, column: u32 },

    /// Arrays/objects nested deeper than [`ParseOptions::max_depth`].
    ///
    /// [`ParseOptions::max_depth`]: crate::ParseOptions::max_depth
    #[error("nesting deeper than {limit} levels")]
    DepthLimitExceeded { limit: usize },

    /// The input contained no value at all.
    #[error("document contains no value")]
    EmptyDocument,

    #[error("node is not an array")]
    NotAnArray,

    #[error("node is not an object")]
    NotAnObject,

    #[error("node is not an array or object")]
    NotAnArrayOrObject,

    /// `as_f64`/`as_bool`/`as_string` applied to a node of the wrong kind.
    #[error("node is not convertible to the requested type")]
    NotConvertible,

    #[error("index {index} is out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no such key {0:?}")]
    UnknownKey(String),

    /// The allocator could not reserve a new arena page.
    #[error("out of memory")]
    OutOfMemory,
}
