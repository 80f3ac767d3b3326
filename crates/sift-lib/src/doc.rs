//! In-memory element tree.
//!
//! A small arena-backed document for callers that do not already have a tree,
//! and the reference implementation of [`NodeAccess`].

use std::fmt::{self, Write};

use indexmap::IndexMap;
use sift_vm::{Adapter, NodeAccess};

/// Handle to a node of one [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Tag name plus attributes in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: IndexMap<String, String>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: IndexMap::new(),
        }
    }

    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    /// Append a token to the `class` attribute.
    pub fn class(mut self, class: impl AsRef<str>) -> Self {
        let classes = self.attributes.entry("class".to_owned()).or_default();
        if !classes.is_empty() {
            classes.push(' ');
        }
        classes.push_str(class.as_ref());
        self
    }

    /// Set an attribute, replacing any previous value.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

#[derive(Debug, Clone)]
struct Node {
    element: Element,
    parent: Option<NodeId>,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,
    next_sibling: Option<NodeId>,
}

/// Tree of elements with a single root. Nodes are never removed.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self {
            nodes: vec![Node {
                element: root,
                parent: None,
                first_child: None,
                last_child: None,
                next_sibling: None,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Add `element` as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// If `parent` belongs to another document.
    pub fn append(&mut self, parent: NodeId, element: Element) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        let previous = self.nodes[parent.index()].last_child;

        self.nodes.push(Node {
            element,
            parent: Some(parent),
            first_child: None,
            last_child: None,
            next_sibling: None,
        });

        match previous {
            Some(prev) => self.nodes[prev.index()].next_sibling = Some(id),
            None => self.nodes[parent.index()].first_child = Some(id),
        }
        self.nodes[parent.index()].last_child = Some(id);
        id
    }

    pub fn element(&self, node: NodeId) -> &Element {
        &self.node(node).element
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Adapter with every handler installed.
    pub fn adapter(&self) -> Adapter<'_, NodeId> {
        Adapter::for_access(self)
    }

    /// Indented outline, one element per line.
    pub fn dump(&self) -> String {
        self.to_string()
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.node(id).first_child, |c| self.node(*c).next_sibling)
    }

    fn write_node(&self, w: &mut impl Write, id: NodeId, depth: usize) -> fmt::Result {
        let element = self.element(id);
        write!(w, "{:indent$}{}", "", element.tag, indent = depth * 2)?;
        for (name, value) in element.attributes() {
            write!(w, " {name}={value:?}")?;
        }
        writeln!(w)?;
        for child in self.children(id) {
            self.write_node(w, child, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_node(f, self.root(), 0)
    }
}

impl NodeAccess for Document {
    type Node = NodeId;

    fn tag_name(&self, node: &NodeId) -> &str {
        &self.node(*node).element.tag
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<&str> {
        self.node(*node).element.attribute(name)
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.node(*node).parent
    }

    fn first_child(&self, node: &NodeId) -> Option<NodeId> {
        self.node(*node).first_child
    }

    fn next_sibling(&self, node: &NodeId) -> Option<NodeId> {
        self.node(*node).next_sibling
    }
}
