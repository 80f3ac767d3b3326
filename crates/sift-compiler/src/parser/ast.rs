//! Selector AST.
//!
//! Transient: built by the parser, consumed by lowering, then dropped.
//! `Display` prints canonical selector text, which round-trips through the parser.

use std::fmt;

/// Comma-separated branches, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    pub selectors: Vec<Selector>,
}

/// Simple selectors joined by combinators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub steps: Vec<Step>,
}

/// One simple selector and the combinator linking it to the previous step.
///
/// Only the first step of a selector has no combinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub combinator: Option<Combinator>,
    pub simple: SimpleSelector,
}

/// Node-level tests that must all hold for one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleSelector {
    pub atoms: Vec<Atom>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Atom {
    Type(String),
    Universal,
    Id(String),
    Class(String),
    Attribute(AttributeSelector),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSelector {
    pub name: String,
    pub matcher: Option<AttributeMatcher>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeMatcher {
    pub operator: AttrOperator,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// Whitespace
    Descendant,
    /// `>`
    Child,
    /// `+`
    NextSibling,
    /// `~`
    SubsequentSibling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttrOperator {
    /// `=`
    Exactly,
    /// `~=`
    Includes,
    /// `|=`
    DashMatch,
    /// `^=`
    Prefix,
    /// `$=`
    Suffix,
    /// `*=`
    Substring,
}

impl AttrOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exactly => "=",
            Self::Includes => "~=",
            Self::DashMatch => "|=",
            Self::Prefix => "^=",
            Self::Suffix => "$=",
            Self::Substring => "*=",
        }
    }
}

impl Combinator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Descendant => " ",
            Self::Child => " > ",
            Self::NextSibling => " + ",
            Self::SubsequentSibling => " ~ ",
        }
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, selector) in self.selectors.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{selector}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            if let Some(combinator) = step.combinator {
                f.write_str(combinator.as_str())?;
            }
            write!(f, "{}", step.simple)?;
        }
        Ok(())
    }
}

impl fmt::Display for SimpleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for atom in &self.atoms {
            write!(f, "{atom}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(name) => write_name(f, name, false),
            Self::Universal => f.write_str("*"),
            Self::Id(name) => {
                f.write_str("#")?;
                write_name(f, name, true)
            }
            Self::Class(name) => {
                f.write_str(".")?;
                write_name(f, name, false)
            }
            Self::Attribute(attr) => write!(f, "{attr}"),
        }
    }
}

impl fmt::Display for AttributeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        write_name(f, &self.name, false)?;
        if let Some(matcher) = &self.matcher {
            f.write_str(matcher.operator.as_str())?;
            // A quoted value cannot end in a backslash.
            if matcher.value.ends_with('\\') {
                write_name(f, &matcher.value, false)?;
                return f.write_str("]");
            }
            f.write_str("\"")?;
            for c in matcher.value.chars() {
                if c == '"' {
                    f.write_str("\\")?;
                }
                write!(f, "{c}")?;
            }
            f.write_str("\"")?;
        }
        f.write_str("]")
    }
}

/// Writes `name` so it lexes back as one name token, escaping what the lexer
/// would not accept bare.
fn write_name(f: &mut fmt::Formatter<'_>, name: &str, leading_digit: bool) -> fmt::Result {
    let mut at_start = !leading_digit;
    for (i, c) in name.chars().enumerate() {
        if i == 0 && c == '-' && name.len() > 1 {
            f.write_str("-")?;
            continue;
        }
        let bare = c == '_'
            || c.is_ascii_alphabetic()
            || !c.is_ascii()
            || (!at_start && (c.is_ascii_digit() || c == '-'));
        if bare {
            write!(f, "{c}")?;
        } else {
            write!(f, "\\{:x} ", c as u32)?;
        }
        at_start = false;
    }
    Ok(())
}
