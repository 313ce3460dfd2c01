//! The document facade: shared ownership, navigation, conversion, mutation.
//!
//! A [`Document`] owns its input text, its arena, and its node table in one
//! [`Store`] behind `Rc<RefCell<_>>`. Every [`NodeHandle`] derived from it
//! shares that store, so the arena and all spans stay alive until the last
//! handle drops, and then everything is released in one step. The types are
//! deliberately `!Send`/`!Sync`: one document is single-threaded by
//! construction, while independent documents never share memory and may live
//! on separate threads.

use alloc::{
    boxed::Box,
    rc::Rc,
    string::String,
    vec::Vec,
};
use core::cell::RefCell;

use bstr::ByteSlice;

use crate::{
    arena::Arena,
    builder::{Provenance, TreeBuilder},
    error::Error,
    node::{Node, NodeId, NodeKind},
    options::ParseOptions,
    parser::Parser,
    scanner::Scanner,
    serializer, text,
    text::Span,
};

#[derive(Debug)]
pub(crate) struct Store {
    source: Box<str>,
    arena: Arena,
    pub(crate) nodes: Vec<Node>,
    options: ParseOptions,
}

impl Store {
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Resolves a span to its raw bytes.
    pub(crate) fn bytes(&self, span: Span) -> &[u8] {
        match span {
            Span::Source { start, end } => &self.source.as_bytes()[start..end],
            Span::Arena(r) => self.arena.bytes(r),
        }
    }
}

/// A parsed JSON document.
///
/// # Examples
///
/// ```
/// use jsontree::Document;
///
/// let doc = Document::parse(r#"{"pi": 3.25, "tags": ["a", "b"]}"#)?;
/// assert_eq!(doc.root().key("pi")?.as_f64()?, 3.25);
///
/// doc.root().key("tags")?.append("\"c\"")?;
/// assert_eq!(doc.root().key("tags")?.size()?, 3);
/// # Ok::<(), jsontree::Error>(())
/// ```
#[derive(Debug)]
pub struct Document {
    store: Rc<RefCell<Store>>,
    root: NodeId,
}

impl Document {
    /// Parses a document with default [`ParseOptions`].
    pub fn parse(text: &str) -> Result<Self, Error> {
        Self::parse_with_options(text, ParseOptions::default())
    }

    /// Parses a document.
    ///
    /// The text is stored in the document; parsed strings are zero-copy views
    /// into it. The document keeps the options and re-applies them when
    /// mutation parses inserted fragments.
    pub fn parse_with_options(text: &str, options: ParseOptions) -> Result<Self, Error> {
        let mut nodes = Vec::new();
        let root = {
            let scanner = Scanner::new(text.as_bytes(), options.allow_comments)?;
            let mut builder = TreeBuilder::new(&mut nodes, Provenance::Source);
            Parser::new(scanner, &mut builder, options.max_depth).parse_document()?;
            builder.finish()?
        };
        let store = Store {
            source: text.into(),
            arena: Arena::new(),
            nodes,
            options,
        };
        Ok(Document {
            store: Rc::new(RefCell::new(store)),
            root,
        })
    }

    /// A handle to the root value. Handles share ownership of the document's
    /// storage and may outlive the `Document` itself.
    #[must_use]
    pub fn root(&self) -> NodeHandle {
        NodeHandle {
            store: Rc::clone(&self.store),
            node: self.root,
        }
    }

    /// Pretty-prints the whole document.
    #[must_use]
    pub fn serialize(&self) -> String {
        serializer::serialize(&self.store.borrow(), self.root)
    }
}

/// A reference to one value inside a [`Document`].
///
/// Cheap to clone; keeps the document's storage alive. Mutation through a
/// handle is visible through every other handle of the same document.
#[derive(Clone, Debug)]
pub struct NodeHandle {
    store: Rc<RefCell<Store>>,
    node: NodeId,
}

impl NodeHandle {
    fn derive(&self, node: NodeId) -> NodeHandle {
        NodeHandle {
            store: Rc::clone(&self.store),
            node,
        }
    }

    /// The kind of the referenced value.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.store.borrow().node(self.node).kind()
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        self.kind() == NodeKind::Null
    }

    /// Child count of an array or object.
    pub fn size(&self) -> Result<usize, Error> {
        let store = self.store.borrow();
        match store.node(self.node) {
            Node::Array(items) => Ok(items.len()),
            Node::Object(pairs) => Ok(pairs.len()),
            _ => Err(Error::NotAnArrayOrObject),
        }
    }

    /// Array element by index.
    pub fn at(&self, index: usize) -> Result<NodeHandle, Error> {
        let store = self.store.borrow();
        let Node::Array(items) = store.node(self.node) else {
            return Err(Error::NotAnArray);
        };
        let id = items
            .get(index)
            .copied()
            .ok_or(Error::IndexOutOfRange {
                index,
                len: items.len(),
            })?;
        Ok(self.derive(id))
    }

    /// Object member by key.
    ///
    /// Key comparison is byte-wise against the raw (still escaped) key bytes.
    /// When duplicate keys survived parsing, the last-written pair wins.
    pub fn key(&self, name: &str) -> Result<NodeHandle, Error> {
        let store = self.store.borrow();
        let Node::Object(pairs) = store.node(self.node) else {
            return Err(Error::NotAnObject);
        };
        for (span, id) in pairs.iter().rev() {
            if store.bytes(*span) == name.as_bytes() {
                return Ok(self.derive(*id));
            }
        }
        Err(Error::UnknownKey(name.into()))
    }

    /// All keys of an object, in insertion order, raw key text.
    pub fn keys(&self) -> Result<Vec<String>, Error> {
        let store = self.store.borrow();
        let Node::Object(pairs) = store.node(self.node) else {
            return Err(Error::NotAnObject);
        };
        Ok(pairs
            .iter()
            .map(|(span, _)| store.bytes(*span).to_str_lossy().into_owned())
            .collect())
    }

    /// The numeric value of a number node.
    pub fn as_f64(&self) -> Result<f64, Error> {
        match self.store.borrow().node(self.node) {
            Node::Number(value) => Ok(*value),
            _ => Err(Error::NotConvertible),
        }
    }

    /// The value of a boolean node.
    pub fn as_bool(&self) -> Result<bool, Error> {
        match self.store.borrow().node(self.node) {
            Node::Boolean(value) => Ok(*value),
            _ => Err(Error::NotConvertible),
        }
    }

    /// The decoded text of a string node.
    ///
    /// Escape sequences are resolved here; the stored span keeps the raw
    /// source bytes (which is also what serialization re-emits).
    pub fn as_string(&self) -> Result<String, Error> {
        let store = self.store.borrow();
        match store.node(self.node) {
            Node::String(span) => Ok(text::unescape(store.bytes(*span))),
            _ => Err(Error::NotConvertible),
        }
    }

    /// Pretty-prints the subtree under this handle.
    #[must_use]
    pub fn serialize(&self) -> String {
        serializer::serialize(&self.store.borrow(), self.node)
    }

    /// Parses `text` into this document and appends the value to this array.
    pub fn append(&self, text: &str) -> Result<(), Error> {
        let mut store = self.store.borrow_mut();
        array_mut(&mut store, self.node)?;
        let id = parse_fragment(&mut store, text)?;
        array_mut(&mut store, self.node)?.push(id);
        Ok(())
    }

    /// Parses `text` into this document and replaces the array element at
    /// `index` with it.
    pub fn set_at(&self, index: usize, text: &str) -> Result<(), Error> {
        let mut store = self.store.borrow_mut();
        let len = array_mut(&mut store, self.node)?.len();
        if index >= len {
            return Err(Error::IndexOutOfRange { index, len });
        }
        let id = parse_fragment(&mut store, text)?;
        array_mut(&mut store, self.node)?[index] = id;
        Ok(())
    }

    /// Parses `text` into this document and sets it under `name`, overwriting
    /// the existing (last-written) pair or appending a new one.
    pub fn set_key(&self, name: &str, text: &str) -> Result<(), Error> {
        let mut store = self.store.borrow_mut();
        object_mut(&mut store, self.node)?;
        let id = parse_fragment(&mut store, text)?;
        let existing = find_pair(&store, self.node, name);
        match existing {
            Some(index) => object_mut(&mut store, self.node)?[index].1 = id,
            None => {
                let key = store.arena.alloc(name.as_bytes())?;
                object_mut(&mut store, self.node)?.push((Span::Arena(key), id));
            }
        }
        Ok(())
    }

    /// Removes the array element at `index`, shifting the rest left.
    pub fn remove_at(&self, index: usize) -> Result<(), Error> {
        let mut store = self.store.borrow_mut();
        let items = array_mut(&mut store, self.node)?;
        if index >= items.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: items.len(),
            });
        }
        items.remove(index);
        Ok(())
    }

    /// Removes the (last-written) pair with the given key.
    pub fn remove_key(&self, name: &str) -> Result<(), Error> {
        let mut store = self.store.borrow_mut();
        object_mut(&mut store, self.node)?;
        match find_pair(&store, self.node, name) {
            Some(index) => {
                object_mut(&mut store, self.node)?.remove(index);
                Ok(())
            }
            None => Err(Error::UnknownKey(name.into())),
        }
    }
}

fn array_mut(store: &mut Store, id: NodeId) -> Result<&mut Vec<NodeId>, Error> {
    match &mut store.nodes[id.index()] {
        Node::Array(items) => Ok(items),
        _ => Err(Error::NotAnArray),
    }
}

fn object_mut(store: &mut Store, id: NodeId) -> Result<&mut Vec<(Span, NodeId)>, Error> {
    match &mut store.nodes[id.index()] {
        Node::Object(pairs) => Ok(pairs),
        _ => Err(Error::NotAnObject),
    }
}

fn find_pair(store: &Store, id: NodeId, name: &str) -> Option<usize> {
    let Node::Object(pairs) = store.node(id) else {
        return None;
    };
    pairs
        .iter()
        .rposition(|(span, _)| store.bytes(*span) == name.as_bytes())
}

/// Re-parses inserted text into this store's own arena.
///
/// The fragment is copied into the arena first and scanned from there, so the
/// resulting spans live as long as the document, never in a foreign buffer.
/// On failure the node table is truncated back; the caller splices the
/// returned id only on success, so a failed mutation leaves the tree as it
/// was.
fn parse_fragment(store: &mut Store, fragment: &str) -> Result<NodeId, Error> {
    let mark = store.nodes.len();
    let copied = {
        let mut writer = store.arena.writer()?;
        writer.extend(fragment.as_bytes())?;
        writer.finish()
    };
    let Store {
        arena,
        nodes,
        options,
        ..
    } = store;
    let result = {
        let provenance = Provenance::Arena {
            page: copied.page,
            base: copied.start,
        };
        Scanner::new(arena.bytes(copied), options.allow_comments).and_then(|scanner| {
            let mut builder = TreeBuilder::new(nodes, provenance);
            Parser::new(scanner, &mut builder, options.max_depth).parse_document()?;
            builder.finish()
        })
    };
    if result.is_err() {
        store.nodes.truncate(mark);
    }
    result
}
