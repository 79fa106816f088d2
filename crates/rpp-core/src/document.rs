//! Arena-backed document tree.
//!
//! A [`Document`] owns every node of a parsed project file in a flat arena.
//! Nodes refer to their children by [`NodeId`], so the tree has no pointer
//! cycles and no reference counting. Callers navigate with [`NodeRef`], a
//! cheap copyable handle that borrows the document.
//!
//! Documents are produced by the parser through [`DocumentBuilder`] and are
//! read-only afterwards.

use std::fmt;

use crate::{query, value::Value};

/// Index of a node inside its [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the document arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// The body of a node: structured children or an opaque payload, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Child nodes in source order. Plain attribute lines have no children.
    Children(Vec<NodeId>),
    /// Raw text of an opaque block, lines concatenated without separator.
    Payload(String),
}

#[derive(Debug, Clone)]
struct NodeData {
    tag: String,
    params: Vec<Value>,
    line: usize,
    body: Body,
}

/// A parsed project file.
///
/// Holds the root of the tree and the flat index: every node produced
/// while tokenizing, in source-line order, regardless of its depth.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
    root: NodeId,
    index: Vec<NodeId>,
}

impl Document {
    /// Returns the outermost block.
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            doc: self,
            id: self.root,
        }
    }

    /// Returns a handle for `id`, or `None` if it does not belong to this document.
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.0 < self.nodes.len()).then_some(NodeRef { doc: self, id })
    }

    /// Number of nodes in the flat index.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if the document has no nodes. A parsed document always
    /// has at least its root.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Iterates over the flat index in source order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeRef<'_>> + '_ {
        self.index.iter().map(|&id| NodeRef { doc: self, id })
    }

    /// Global tag-chain search.
    ///
    /// The first tag is matched against every node in the document; each
    /// following tag must be a direct child of a previous match.
    ///
    /// # Example
    ///
    /// ```text
    /// doc.query(["TRACK", "ITEM"])  // every ITEM directly under any TRACK
    /// ```
    pub fn query<I, S>(&self, chain: I) -> Vec<NodeRef<'_>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        query::select(self.nodes().collect(), chain)
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }
}

/// Incrementally assembles a [`Document`].
///
/// Nodes are pushed in the order they are produced; block nodes receive
/// their children once every nested block has been resolved.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    nodes: Vec<NodeData>,
}

impl DocumentBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node with an (initially) empty children list.
    pub fn push_node(&mut self, tag: impl Into<String>, params: Vec<Value>, line: usize) -> NodeId {
        self.push(tag.into(), params, line, Body::Children(Vec::new()))
    }

    /// Add an opaque node carrying a raw payload.
    pub fn push_opaque(
        &mut self,
        tag: impl Into<String>,
        params: Vec<Value>,
        line: usize,
        payload: String,
    ) -> NodeId {
        self.push(tag.into(), params, line, Body::Payload(payload))
    }

    /// Replace the children of a structured node.
    ///
    /// Opaque nodes keep their payload; the call is ignored for them.
    pub fn set_children(&mut self, id: NodeId, children: Vec<NodeId>) {
        let node = &mut self.nodes[id.0];
        match &mut node.body {
            Body::Children(existing) => *existing = children,
            Body::Payload(_) => {
                log::warn!(tag = node.tag; "Ignoring children for opaque node");
            }
        }
    }

    /// Number of nodes pushed so far.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if no node has been pushed.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Finish the document with `root` as its outermost node.
    ///
    /// The flat index holds every pushed node, ordered by source line.
    pub fn build(self, root: NodeId) -> Document {
        let mut index: Vec<NodeId> = (0..self.nodes.len()).map(NodeId).collect();
        index.sort_by_key(|id| self.nodes[id.0].line);

        Document {
            nodes: self.nodes,
            root,
            index,
        }
    }

    fn push(&mut self, tag: String, params: Vec<Value>, line: usize, body: Body) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            tag,
            params,
            line,
            body,
        });
        id
    }
}

/// Borrowed handle to a node of a [`Document`].
#[derive(Clone, Copy)]
pub struct NodeRef<'doc> {
    doc: &'doc Document,
    id: NodeId,
}

impl<'doc> NodeRef<'doc> {
    /// The node's id within its document.
    pub fn id(self) -> NodeId {
        self.id
    }

    /// The document this node belongs to.
    pub fn document(self) -> &'doc Document {
        self.doc
    }

    /// Tag name, case preserved.
    pub fn tag(self) -> &'doc str {
        &self.data().tag
    }

    /// Case-insensitive tag comparison.
    pub fn has_tag(self, tag: &str) -> bool {
        self.tag().eq_ignore_ascii_case(tag)
    }

    /// Ordered parameters.
    pub fn params(self) -> &'doc [Value] {
        &self.data().params
    }

    /// Parameter at `index`, if present.
    pub fn param(self, index: usize) -> Option<&'doc Value> {
        self.data().params.get(index)
    }

    /// 1-based source line the node was read from.
    pub fn line(self) -> usize {
        self.data().line
    }

    /// The node body.
    pub fn body(self) -> &'doc Body {
        &self.data().body
    }

    /// Raw payload of an opaque node.
    pub fn payload(self) -> Option<&'doc str> {
        match &self.data().body {
            Body::Payload(payload) => Some(payload),
            Body::Children(_) => None,
        }
    }

    /// Returns `true` if the node stores a payload instead of children.
    pub fn is_opaque(self) -> bool {
        matches!(self.data().body, Body::Payload(_))
    }

    /// Direct children in source order. Empty for opaque nodes.
    pub fn children(self) -> Children<'doc> {
        let ids: &'doc [NodeId] = match &self.data().body {
            Body::Children(ids) => ids,
            Body::Payload(_) => &[],
        };
        Children {
            doc: self.doc,
            ids: ids.iter(),
        }
    }

    /// Returns `true` if the node has at least one child.
    pub fn has_children(self) -> bool {
        self.children().len() > 0
    }

    /// Scoped tag-chain search among this node's descendants.
    ///
    /// Same as [`query::query_within`].
    pub fn query<I, S>(self, chain: I) -> Vec<NodeRef<'doc>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        query::query_within(self, chain)
    }

    fn data(self) -> &'doc NodeData {
        self.doc.data(self.id)
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("NodeRef");
        debug
            .field("id", &self.id.0)
            .field("line", &self.line())
            .field("tag", &self.tag())
            .field("params", &self.params());
        match self.body() {
            Body::Children(ids) => debug.field("children", &ids.len()),
            Body::Payload(payload) => debug.field("payload_len", &payload.len()),
        };
        debug.finish()
    }
}

/// Iterator over the direct children of a node.
#[derive(Debug, Clone)]
pub struct Children<'doc> {
    doc: &'doc Document,
    ids: std::slice::Iter<'doc, NodeId>,
}

impl<'doc> Iterator for Children<'doc> {
    type Item = NodeRef<'doc>;

    fn next(&mut self) -> Option<Self::Item> {
        self.ids.next().map(|&id| NodeRef { doc: self.doc, id })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl DoubleEndedIterator for Children<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.ids.next_back().map(|&id| NodeRef { doc: self.doc, id })
    }
}

impl ExactSizeIterator for Children<'_> {}
