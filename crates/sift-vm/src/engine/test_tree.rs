//! Arena tree for VM tests, built from an indented outline.
//!
//! ```text
//! div#root.a.b lang=en
//!   p
//! ```
//!
//! Two spaces per level. The first word is `tag#id.class...`; later words are
//! `name=value` attributes. Node handles are preorder indices, so document order
//! is numeric order.

use super::NodeAccess;

#[derive(Debug, Default)]
pub struct TestTree {
    nodes: Vec<TestNode>,
}

#[derive(Debug)]
struct TestNode {
    tag: String,
    attrs: Vec<(String, String)>,
    parent: Option<usize>,
    children: Vec<usize>,
}

impl TestTree {
    pub fn parse(outline: &str) -> Self {
        let mut tree = Self::default();
        // Last node seen at each depth.
        let mut open: Vec<usize> = Vec::new();

        for line in outline.lines().filter(|l| !l.trim().is_empty()) {
            let depth = (line.len() - line.trim_start().len()) / 2;
            open.truncate(depth);
            let parent = open.last().copied();
            let id = tree.push(parent, line.trim());
            open.push(id);
        }

        tree
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    fn push(&mut self, parent: Option<usize>, line: &str) -> usize {
        let mut words = line.split_whitespace();
        let head = words.next().unwrap_or_default();

        let mut attrs = Vec::new();
        let mut tag = String::new();
        let mut classes: Vec<&str> = Vec::new();
        let mut rest = head;
        let end = rest.find(['#', '.']).unwrap_or(rest.len());
        tag.push_str(&rest[..end]);
        rest = &rest[end..];
        while let Some(sigil) = rest.chars().next() {
            let body = &rest[1..];
            let end = body.find(['#', '.']).unwrap_or(body.len());
            match sigil {
                '#' => attrs.push(("id".to_owned(), body[..end].to_owned())),
                _ => classes.push(&body[..end]),
            }
            rest = &body[end..];
        }
        if !classes.is_empty() {
            attrs.push(("class".to_owned(), classes.join(" ")));
        }
        for word in words {
            let (name, value) = word.split_once('=').unwrap_or((word, ""));
            attrs.push((name.to_owned(), value.to_owned()));
        }

        let id = self.nodes.len();
        self.nodes.push(TestNode {
            tag,
            attrs,
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent].children.push(id);
        }
        id
    }
}

impl NodeAccess for TestTree {
    type Node = usize;

    fn tag_name(&self, node: &usize) -> &str {
        &self.nodes[*node].tag
    }

    fn attribute(&self, node: &usize, name: &str) -> Option<&str> {
        self.nodes[*node]
            .attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    fn parent(&self, node: &usize) -> Option<usize> {
        self.nodes[*node].parent
    }

    fn first_child(&self, node: &usize) -> Option<usize> {
        self.nodes[*node].children.first().copied()
    }

    fn next_sibling(&self, node: &usize) -> Option<usize> {
        let parent = self.nodes[*node].parent?;
        let siblings = &self.nodes[parent].children;
        let pos = siblings.iter().position(|c| c == node)?;
        siblings.get(pos + 1).copied()
    }
}
