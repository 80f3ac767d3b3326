//! Standard adapter for element trees.
//!
//! Any tree that can answer a handful of navigation and attribute questions gets
//! a complete [`Adapter`] through [`Adapter::for_access`].

use std::hash::Hash;

use sift_bytecode::{CombinatorOp, FilterArgs, FilterOp};

use super::adapter::{Adapter, NodeIter, Predicate};

/// Read-only view of an element tree.
///
/// Nodes are cheap handles; the implementor owns the data.
pub trait NodeAccess {
    type Node: Clone + Eq + Hash;

    fn tag_name(&self, node: &Self::Node) -> &str;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<&str>;

    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    fn first_child(&self, node: &Self::Node) -> Option<Self::Node>;

    fn next_sibling(&self, node: &Self::Node) -> Option<Self::Node>;

    fn id(&self, node: &Self::Node) -> Option<&str> {
        self.attribute(node, "id")
    }

    /// Whitespace-separated tokens of the `class` attribute.
    fn classes(&self, node: &Self::Node) -> impl Iterator<Item = &str> {
        self.attribute(node, "class")
            .into_iter()
            .flat_map(|value| value.split_ascii_whitespace())
    }
}

impl<'t, N: Clone + Eq + Hash + 't> Adapter<'t, N> {
    /// Adapter with a handler for every opcode, backed by `access`.
    ///
    /// Tag names compare ASCII case-insensitively; ids, classes, attribute names
    /// and values compare exactly.
    pub fn for_access<A: NodeAccess<Node = N>>(access: &'t A) -> Self {
        Self::builder()
            .filter(FilterOp::TagName, move |args: &FilterArgs| -> Predicate<'t, N> {
                let name: Box<str> = args.name().unwrap_or_default().into();
                Box::new(move |node: &N| access.tag_name(node).eq_ignore_ascii_case(&name))
            })
            .filter(FilterOp::Id, move |args: &FilterArgs| -> Predicate<'t, N> {
                let name: Box<str> = args.name().unwrap_or_default().into();
                Box::new(move |node: &N| access.id(node) == Some(&*name))
            })
            .filter(FilterOp::AttrPresence, move |args: &FilterArgs| -> Predicate<'t, N> {
                let name: Box<str> = args.name().unwrap_or_default().into();
                Box::new(move |node: &N| access.attribute(node, &name).is_some())
            })
            .filter(FilterOp::AttrExactly, move |args: &FilterArgs| {
                attr_filter(access, args, |attr, value| attr == value)
            })
            .filter(FilterOp::AttrWord, move |args: &FilterArgs| {
                attr_filter(access, args, |attr, value| {
                    !value.is_empty()
                        && !value.contains(|c: char| c.is_ascii_whitespace())
                        && attr.split_ascii_whitespace().any(|word| word == value)
                })
            })
            .filter(FilterOp::AttrBegin, move |args: &FilterArgs| {
                attr_filter(access, args, |attr, value| {
                    attr.strip_prefix(value)
                        .is_some_and(|rest| rest.is_empty() || rest.starts_with('-'))
                })
            })
            .filter(FilterOp::AttrPrefix, move |args: &FilterArgs| {
                attr_filter(access, args, |attr, value| {
                    !value.is_empty() && attr.starts_with(value)
                })
            })
            .filter(FilterOp::AttrSuffix, move |args: &FilterArgs| {
                attr_filter(access, args, |attr, value| {
                    !value.is_empty() && attr.ends_with(value)
                })
            })
            .filter(FilterOp::AttrSubstring, move |args: &FilterArgs| {
                attr_filter(access, args, |attr, value| {
                    !value.is_empty() && attr.contains(value)
                })
            })
            .filter(FilterOp::Classes, move |args: &FilterArgs| -> Predicate<'t, N> {
                let wanted: Vec<Box<str>> = args
                    .classes()
                    .map(|set| set.iter().cloned().collect())
                    .unwrap_or_default();
                Box::new(move |node: &N| {
                    wanted
                        .iter()
                        .all(|class| access.classes(node).any(|c| c == &**class))
                })
            })
            .combinator(CombinatorOp::Descendant, move |nodes: NodeIter<'t, N>| {
                let out: NodeIter<'t, N> =
                    Box::new(nodes.flat_map(move |node| Descendants::new(access, node)));
                out
            })
            .combinator(CombinatorOp::Children, move |nodes: NodeIter<'t, N>| {
                let out: NodeIter<'t, N> = Box::new(nodes.flat_map(move |node| Siblings {
                    access,
                    next: access.first_child(&node),
                }));
                out
            })
            .combinator(CombinatorOp::SiblingNext, move |nodes: NodeIter<'t, N>| {
                let out: NodeIter<'t, N> =
                    Box::new(nodes.filter_map(move |node| access.next_sibling(&node)));
                out
            })
            .combinator(CombinatorOp::SiblingSubsequent, move |nodes: NodeIter<'t, N>| {
                let out: NodeIter<'t, N> = Box::new(nodes.flat_map(move |node| Siblings {
                    access,
                    next: access.next_sibling(&node),
                }));
                out
            })
            .build()
    }
}

/// Predicate over one attribute's value. Nodes without the attribute never match.
fn attr_filter<'t, A>(
    access: &'t A,
    args: &FilterArgs,
    test: fn(&str, &str) -> bool,
) -> Predicate<'t, A::Node>
where
    A: NodeAccess,
    A::Node: 't,
{
    let name: Box<str> = args.name().unwrap_or_default().into();
    let value: Box<str> = args.value().unwrap_or_default().into();
    Box::new(move |node: &A::Node| {
        access
            .attribute(node, &name)
            .is_some_and(|attr| test(attr, &value))
    })
}

/// Preorder walk below `root`, excluding `root` itself.
struct Descendants<'t, A: NodeAccess> {
    access: &'t A,
    root: A::Node,
    next: Option<A::Node>,
}

impl<'t, A: NodeAccess> Descendants<'t, A> {
    fn new(access: &'t A, root: A::Node) -> Self {
        let next = access.first_child(&root);
        Self { access, root, next }
    }

    fn successor(&self, node: &A::Node) -> Option<A::Node> {
        if let Some(child) = self.access.first_child(node) {
            return Some(child);
        }
        let mut current = node.clone();
        loop {
            if current == self.root {
                return None;
            }
            if let Some(sibling) = self.access.next_sibling(&current) {
                return Some(sibling);
            }
            current = self.access.parent(&current)?;
        }
    }
}

impl<A: NodeAccess> Iterator for Descendants<'_, A> {
    type Item = A::Node;

    fn next(&mut self) -> Option<A::Node> {
        let current = self.next.take()?;
        self.next = self.successor(&current);
        Some(current)
    }
}

/// A node and every sibling after it.
struct Siblings<'t, A: NodeAccess> {
    access: &'t A,
    next: Option<A::Node>,
}

impl<A: NodeAccess> Iterator for Siblings<'_, A> {
    type Item = A::Node;

    fn next(&mut self) -> Option<A::Node> {
        let current = self.next.take()?;
        self.next = self.access.next_sibling(&current);
        Some(current)
    }
}
