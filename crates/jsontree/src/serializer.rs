//! Recursive pretty-printer.
//!
//! Dispatch is a plain `match` over the tagged node union, parameterized by
//! the current indent level. Objects render multi-line with 4-space indents;
//! arrays render inline. String spans are re-emitted verbatim: escapes were
//! never decoded into the tree, so writing the raw bytes back between quotes
//! reproduces the source exactly and keeps round-trips byte-stable.
//!
//! Output is assembled as bytes and leaves through a lossy UTF-8 conversion,
//! matching the crate's no-validation stance on input encoding.

use alloc::{format, string::String, vec::Vec};

use bstr::ByteVec;

use crate::{
    document::Store,
    node::{Node, NodeId},
};

const INDENT: &[u8] = b"    ";

pub(crate) fn serialize(store: &Store, root: NodeId) -> String {
    let mut out = Vec::new();
    write_node(store, root, 0, &mut out);
    out.into_string_lossy()
}

fn write_node(store: &Store, id: NodeId, level: usize, out: &mut Vec<u8>) {
    match store.node(id) {
        Node::Null => out.extend_from_slice(b"null"),
        Node::Boolean(true) => out.extend_from_slice(b"true"),
        Node::Boolean(false) => out.extend_from_slice(b"false"),
        Node::Number(value) => out.extend_from_slice(format!("{value}").as_bytes()),
        Node::String(span) => {
            out.push(b'"');
            out.extend_from_slice(store.bytes(*span));
            out.push(b'"');
        }
        Node::Array(items) => {
            out.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.extend_from_slice(b", ");
                }
                write_node(store, *item, level, out);
            }
            out.push(b']');
        }
        Node::Object(pairs) => {
            if level > 0 {
                out.push(b'\n');
                indent(out, level);
            }
            out.extend_from_slice(b"{\n");
            for (i, (key, value)) in pairs.iter().enumerate() {
                indent(out, level + 1);
                out.push(b'"');
                out.extend_from_slice(store.bytes(*key));
                out.extend_from_slice(b"\": ");
                write_node(store, *value, level + 1, out);
                if i + 1 < pairs.len() {
                    out.extend_from_slice(b",\n");
                } else {
                    out.push(b'\n');
                }
            }
            indent(out, level);
            out.push(b'}');
        }
    }
}

fn indent(out: &mut Vec<u8>, level: usize) {
    for _ in 0..level {
        out.extend_from_slice(INDENT);
    }
}
