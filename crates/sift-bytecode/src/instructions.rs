//! Instruction definitions.
//!
//! A compiled selector is a flat list of [`Instruction`]s. Each comma-separated
//! branch is bracketed by `Reset` and `Yield`; between them, filters narrow the
//! candidate set and combinators move it through the tree.

use std::fmt;

use indexmap::IndexSet;

/// Node-level test opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum FilterOp {
    /// `div`
    TagName = 0,
    /// `#main`
    Id,
    /// `[href]`
    AttrPresence,
    /// `[lang=en]`
    AttrExactly,
    /// `[rel~=nofollow]`
    AttrWord,
    /// `[lang|=en]`
    AttrBegin,
    /// `[href^=https]`
    AttrPrefix,
    /// `[src$=".png"]`
    AttrSuffix,
    /// `[title*=draft]`
    AttrSubstring,
    /// `.a.b`, batched per simple selector
    Classes,
}

impl FilterOp {
    pub const COUNT: usize = 10;

    pub const ALL: [FilterOp; Self::COUNT] = [
        Self::TagName,
        Self::Id,
        Self::AttrPresence,
        Self::AttrExactly,
        Self::AttrWord,
        Self::AttrBegin,
        Self::AttrPrefix,
        Self::AttrSuffix,
        Self::AttrSubstring,
        Self::Classes,
    ];

    /// Position in handler tables.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TagName => "tag-name",
            Self::Id => "id",
            Self::AttrPresence => "attr-presence",
            Self::AttrExactly => "attr-exactly",
            Self::AttrWord => "attr-word",
            Self::AttrBegin => "attr-begin",
            Self::AttrPrefix => "attr-prefix",
            Self::AttrSuffix => "attr-suffix",
            Self::AttrSubstring => "attr-substring",
            Self::Classes => "classes",
        }
    }

    /// Check if the opcode compares an attribute value (as opposed to presence).
    pub fn is_attr_value_op(self) -> bool {
        matches!(
            self,
            Self::AttrExactly
                | Self::AttrWord
                | Self::AttrBegin
                | Self::AttrPrefix
                | Self::AttrSuffix
                | Self::AttrSubstring
        )
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural navigation opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum CombinatorOp {
    /// Whitespace: every descendant, not only children.
    Descendant = 0,
    /// `>`
    Children,
    /// `+`
    SiblingNext,
    /// `~`
    SiblingSubsequent,
}

impl CombinatorOp {
    pub const COUNT: usize = 4;

    pub const ALL: [CombinatorOp; Self::COUNT] = [
        Self::Descendant,
        Self::Children,
        Self::SiblingNext,
        Self::SiblingSubsequent,
    ];

    /// Position in handler tables.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Descendant => "descendant",
            Self::Children => "children",
            Self::SiblingNext => "sibling-next",
            Self::SiblingSubsequent => "sibling-subsequent",
        }
    }
}

impl fmt::Display for CombinatorOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operands of a filter instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterArgs {
    /// Tag name, id, or the attribute name of a presence test.
    Name(Box<str>),
    /// Attribute name and the value it is compared against.
    Attr { name: Box<str>, value: Box<str> },
    /// Class names in first-seen order, duplicates collapsed.
    Classes(IndexSet<Box<str>>),
}

impl FilterArgs {
    /// The single name operand, or the attribute name.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Name(name) | Self::Attr { name, .. } => Some(&**name),
            Self::Classes(_) => None,
        }
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Attr { value, .. } => Some(&**value),
            _ => None,
        }
    }

    pub fn classes(&self) -> Option<&IndexSet<Box<str>>> {
        match self {
            Self::Classes(set) => Some(set),
            _ => None,
        }
    }

    /// Check whether these operands have the shape `op` expects.
    pub fn fits(&self, op: FilterOp) -> bool {
        match self {
            Self::Name(_) => {
                matches!(op, FilterOp::TagName | FilterOp::Id | FilterOp::AttrPresence)
            }
            Self::Attr { .. } => op.is_attr_value_op(),
            Self::Classes(set) => op == FilterOp::Classes && !set.is_empty(),
        }
    }
}

impl fmt::Display for FilterArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "{name:?}"),
            Self::Attr { name, value } => write!(f, "{name:?} {value:?}"),
            Self::Classes(set) => {
                for (i, class) in set.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{class:?}")?;
                }
                Ok(())
            }
        }
    }
}

/// One VM step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Start a branch: candidates are re-seeded from the root.
    Reset,
    /// Keep only candidates satisfying the predicate.
    Filter { op: FilterOp, args: FilterArgs },
    /// Replace candidates with the nodes reached through a relationship.
    Combinator(CombinatorOp),
    /// End a branch: surviving candidates become results.
    Yield,
}

impl Instruction {
    pub fn filter(op: FilterOp, args: FilterArgs) -> Self {
        Self::Filter { op, args }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reset => f.write_str("reset"),
            Self::Filter { op, args } => write!(f, "filter {op} {args}"),
            Self::Combinator(op) => write!(f, "combinator {op}"),
            Self::Yield => f.write_str("yield"),
        }
    }
}
