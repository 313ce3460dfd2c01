//! The tree-building action sink.
//!
//! Folds the grammar driver's callbacks into nodes using an explicit value
//! stack, so node assembly never rides the native call stack no matter how
//! wide or deep the document is. Scalar callbacks append a node and push its
//! id; `end_array`/`end_object` pop the just-produced ids and wrap them.

use alloc::vec::Vec;
use core::ops::Range;

use crate::{
    arena::ArenaRef,
    error::Error,
    node::{Node, NodeId},
    parser::Actions,
    text::Span,
};

/// Which buffer the parsed ranges point into.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Provenance {
    /// The document's original input text.
    Source,
    /// A fragment copied into the document's arena, starting at `base` of
    /// page `page`.
    Arena { page: usize, base: usize },
}

impl Provenance {
    fn span(self, range: &Range<usize>) -> Span {
        match self {
            Provenance::Source => Span::Source {
                start: range.start,
                end: range.end,
            },
            Provenance::Arena { page, base } => Span::Arena(ArenaRef {
                page,
                start: base + range.start,
                end: base + range.end,
            }),
        }
    }
}

pub(crate) struct TreeBuilder<'nodes> {
    nodes: &'nodes mut Vec<Node>,
    provenance: Provenance,
    stack: Vec<NodeId>,
}

impl<'nodes> TreeBuilder<'nodes> {
    pub(crate) fn new(nodes: &'nodes mut Vec<Node>, provenance: Provenance) -> Self {
        TreeBuilder {
            nodes,
            provenance,
            stack: Vec::new(),
        }
    }

    /// Returns the root id once the grammar has completed.
    ///
    /// Anything other than exactly one produced value is the fatal
    /// empty/malformed-document condition.
    pub(crate) fn finish(mut self) -> Result<NodeId, Error> {
        match self.stack.pop() {
            Some(root) if self.stack.is_empty() => Ok(root),
            _ => Err(Error::EmptyDocument),
        }
    }

    fn push(&mut self, node: Node) {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        self.stack.push(id);
    }

    fn split_last(&mut self, count: usize) -> Result<Vec<NodeId>, Error> {
        let at = self
            .stack
            .len()
            .checked_sub(count)
            .ok_or(Error::IndexOutOfRange {
                index: count,
                len: self.stack.len(),
            })?;
        Ok(self.stack.split_off(at))
    }
}

impl Actions for TreeBuilder<'_> {
    fn string(&mut self, content: Range<usize>) -> Result<(), Error> {
        let span = self.provenance.span(&content);
        self.push(Node::String(span));
        Ok(())
    }

    fn number(&mut self, value: f64) -> Result<(), Error> {
        self.push(Node::Number(value));
        Ok(())
    }

    fn boolean(&mut self, value: bool) -> Result<(), Error> {
        self.push(Node::Boolean(value));
        Ok(())
    }

    fn null(&mut self) -> Result<(), Error> {
        self.push(Node::Null);
        Ok(())
    }

    fn end_array(&mut self, len: usize) -> Result<(), Error> {
        let items = self.split_last(len)?;
        self.push(Node::Array(items));
        Ok(())
    }

    fn end_object(&mut self, len: usize) -> Result<(), Error> {
        let flat = self.split_last(len * 2)?;
        let mut pairs = Vec::with_capacity(len);
        for window in flat.chunks_exact(2) {
            let key = match &self.nodes[window[0].index()] {
                Node::String(span) => *span,
                _ => unreachable!("object keys are string nodes"),
            };
            pairs.push((key, window[1]));
        }
        self.push(Node::Object(pairs));
        Ok(())
    }
}
