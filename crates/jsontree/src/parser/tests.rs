use alloc::{string::String, vec, vec::Vec};
use core::ops::Range;

use super::{Actions, NullSink, Parser};
use crate::{
    error::Error,
    scanner::{Scanner, TokenKind},
};

/// Records every callback so tests can assert the exact drive sequence.
#[derive(Debug, Clone, PartialEq)]
enum Call {
    Str(String),
    Num(f64),
    Bool(bool),
    Null,
    BeginArr,
    EndArr(usize),
    BeginObj,
    EndObj(usize),
}

struct Recorder<'src> {
    input: &'src [u8],
    calls: Vec<Call>,
}

impl Actions for Recorder<'_> {
    fn string(&mut self, content: Range<usize>) -> Result<(), Error> {
        let text = String::from_utf8(self.input[content].to_vec()).unwrap();
        self.calls.push(Call::Str(text));
        Ok(())
    }

    fn number(&mut self, value: f64) -> Result<(), Error> {
        self.calls.push(Call::Num(value));
        Ok(())
    }

    fn boolean(&mut self, value: bool) -> Result<(), Error> {
        self.calls.push(Call::Bool(value));
        Ok(())
    }

    fn null(&mut self) -> Result<(), Error> {
        self.calls.push(Call::Null);
        Ok(())
    }

    fn begin_array(&mut self) -> Result<(), Error> {
        self.calls.push(Call::BeginArr);
        Ok(())
    }

    fn end_array(&mut self, len: usize) -> Result<(), Error> {
        self.calls.push(Call::EndArr(len));
        Ok(())
    }

    fn begin_object(&mut self) -> Result<(), Error> {
        self.calls.push(Call::BeginObj);
        Ok(())
    }

    fn end_object(&mut self, len: usize) -> Result<(), Error> {
        self.calls.push(Call::EndObj(len));
        Ok(())
    }
}

fn record(input: &str) -> Result<Vec<Call>, Error> {
    let mut recorder = Recorder {
        input: input.as_bytes(),
        calls: Vec::new(),
    };
    let scanner = Scanner::new(input.as_bytes(), true)?;
    Parser::new(scanner, &mut recorder, 128).parse_document()?;
    Ok(recorder.calls)
}

fn drive(input: &str, max_depth: usize) -> Result<(), Error> {
    let scanner = Scanner::new(input.as_bytes(), true)?;
    let mut sink = NullSink;
    Parser::new(scanner, &mut sink, max_depth).parse_document()
}

#[test]
fn callback_sequence_for_nested_document() {
    let calls = record(r#"{"a": [1, true], "b": null}"#).unwrap();
    assert_eq!(
        calls,
        vec![
            Call::BeginObj,
            Call::Str("a".into()),
            Call::BeginArr,
            Call::Num(1.0),
            Call::Bool(true),
            Call::EndArr(2),
            Call::Str("b".into()),
            Call::Null,
            Call::EndObj(2),
        ]
    );
}

#[test]
fn string_content_has_quotes_stripped_but_escapes_kept() {
    let calls = record(r#""a\nb""#).unwrap();
    assert_eq!(calls, vec![Call::Str(r"a\nb".into())]);
}

#[test]
fn empty_composites_fold_zero() {
    assert_eq!(
        record("[]").unwrap(),
        vec![Call::BeginArr, Call::EndArr(0)]
    );
    assert_eq!(
        record("{}").unwrap(),
        vec![Call::BeginObj, Call::EndObj(0)]
    );
}

#[test]
fn scalar_root_documents() {
    assert_eq!(record("42").unwrap(), vec![Call::Num(42.0)]);
    assert_eq!(record("-2.5e2").unwrap(), vec![Call::Num(-250.0)]);
    assert_eq!(record("false").unwrap(), vec![Call::Bool(false)]);
    assert_eq!(record("null").unwrap(), vec![Call::Null]);
}

#[test]
fn empty_input_is_a_distinct_error() {
    assert_eq!(drive("", 128), Err(Error::EmptyDocument));
    assert_eq!(drive("  \n\t ", 128), Err(Error::EmptyDocument));
    assert_eq!(drive("// only a comment", 128), Err(Error::EmptyDocument));
}

#[test]
fn unexpected_token_carries_expected_and_found() {
    assert_eq!(
        drive("[1, 2", 128),
        Err(Error::UnexpectedToken {
            expected: TokenKind::RBracket,
            found: TokenKind::Eof,
            line: 1,
            column: 6,
        })
    );
    assert_eq!(
        drive(r#"{"a" 1}"#, 128),
        Err(Error::UnexpectedToken {
            expected: TokenKind::Colon,
            found: TokenKind::Number,
            line: 1,
            column: 6,
        })
    );
    // Object keys must be strings.
    assert!(matches!(
        drive("{1: 2}", 128),
        Err(Error::UnexpectedToken {
            expected: TokenKind::String,
            found: TokenKind::Number,
            ..
        })
    ));
}

#[test]
fn value_start_errors_carry_only_found() {
    assert_eq!(
        drive("[}", 128),
        Err(Error::ExpectedValue {
            found: TokenKind::RBrace,
            line: 1,
            column: 2,
        })
    );
    assert!(matches!(
        drive("[1, 2, ]", 128),
        Err(Error::ExpectedValue {
            found: TokenKind::RBracket,
            ..
        })
    ));
}

#[test]
fn trailing_input_after_root_is_rejected() {
    assert!(matches!(
        drive("1 2", 128),
        Err(Error::UnexpectedToken {
            expected: TokenKind::Eof,
            found: TokenKind::Number,
            ..
        })
    ));
    assert!(matches!(
        drive("{} []", 128),
        Err(Error::UnexpectedToken {
            expected: TokenKind::Eof,
            found: TokenKind::LBracket,
            ..
        })
    ));
}

#[test]
fn number_overflow_is_reported_not_saturated() {
    assert!(matches!(
        drive("3e309", 128),
        Err(Error::NumberOverflow { line: 1, column: 1 })
    ));
    assert!(matches!(
        drive("[1, -1e999]", 128),
        Err(Error::NumberOverflow { .. })
    ));
}

#[test]
fn depth_limit_guards_recursion() {
    assert!(drive("[[[[1]]]]", 4).is_ok());
    assert_eq!(
        drive("[[[[1]]]]", 3),
        Err(Error::DepthLimitExceeded { limit: 3 })
    );
    assert_eq!(
        drive(r#"{"a": {"b": [{}]}}"#, 3),
        Err(Error::DepthLimitExceeded { limit: 3 })
    );
}
