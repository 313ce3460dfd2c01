//! An arena-backed JSON document tree.
//!
//! `jsontree` parses JSON text (plus `//` and `/* */` comments as
//! inter-token trivia) into an in-memory tree, offers navigation, scalar
//! conversion and mutation over that tree, and pretty-prints it back to text.
//!
//! The pipeline: a zero-copy scanner tokenizes the input; a
//! recursive-descent grammar driver reports productions to an [`Actions`]
//! sink; the default sink materializes nodes indexed by a per-document table,
//! with all string bytes either borrowed from the input text or copied into a
//! page-based arena owned by the same document. Documents and handles share
//! that storage by reference count and release it in one step when the last
//! handle drops.
//!
//! ```
//! use jsontree::Document;
//!
//! let doc = Document::parse(
//!     r#"
//!     {
//!         // human-edited config files may carry comments
//!         "name": "example",
//!         "ports": [80, 443]
//!     }
//!     "#,
//! )?;
//!
//! assert_eq!(doc.root().key("name")?.as_string()?, "example");
//! doc.root().key("ports")?.append("8080")?;
//! assert_eq!(doc.root().key("ports")?.size()?, 3);
//! # Ok::<(), jsontree::Error>(())
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod arena;
mod builder;
mod document;
mod error;
mod node;
mod options;
mod parser;
mod scanner;
mod serializer;
mod text;


pub use document::{Document, NodeHandle};
pub use error::{Error, ScanError};
pub use node::NodeKind;
pub use options::ParseOptions;
pub use parser::{Actions, NullSink};
pub use scanner::TokenKind;

use crate::{parser::Parser, scanner::Scanner};

/// Checks that `text` is a well-formed document without building a tree.
///
/// ```
/// assert!(jsontree::validate("[1, 2, 3] // ok").is_ok());
/// assert!(jsontree::validate("[1, 2,]").is_err());
/// ```
pub fn validate(text: &str) -> Result<(), Error> {
    let mut sink = NullSink;
    parse_with(text, ParseOptions::default(), &mut sink)
}

/// Drives the grammar over `text`, reporting every production to `sink`.
///
/// This is the hook for consumers that want the parse without the tree; the
/// sink sees the same callback sequence the document builder does.
pub fn parse_with<A: Actions>(
    text: &str,
    options: ParseOptions,
    sink: &mut A,
) -> Result<(), Error> {
    let scanner = Scanner::new(text.as_bytes(), options.allow_comments)?;
    Parser::new(scanner, sink, options.max_depth).parse_document()
}
