//! Lowering pass: transforms the selector AST into the flat instruction stream.
//!
//! Each comma-separated selector becomes one `Reset … Yield` block:
//! - the first step's atoms filter the seeded candidates
//! - every later step emits its combinator, then its filters
//! - class atoms of one step collapse into a single `Classes` filter
//!   (duplicates dropped, first occurrence order kept) emitted after the others
//! - `*` emits nothing

use indexmap::IndexSet;
use sift_bytecode::{CombinatorOp, FilterArgs, FilterOp, Instruction};

use crate::parser::ast::{
    Atom, AttrOperator, AttributeSelector, Combinator, Selector, SelectorList, SimpleSelector,
};

/// Lower a parsed selector list into instructions.
pub fn lower(list: &SelectorList) -> Vec<Instruction> {
    let mut out = Vec::new();
    for selector in &list.selectors {
        lower_selector(selector, &mut out);
    }
    out
}

fn lower_selector(selector: &Selector, out: &mut Vec<Instruction>) {
    out.push(Instruction::Reset);
    for step in &selector.steps {
        if let Some(combinator) = step.combinator {
            out.push(Instruction::Combinator(combinator_op(combinator)));
        }
        lower_simple(&step.simple, out);
    }
    out.push(Instruction::Yield);
}

fn lower_simple(simple: &SimpleSelector, out: &mut Vec<Instruction>) {
    let mut classes: IndexSet<Box<str>> = IndexSet::new();

    for atom in &simple.atoms {
        match atom {
            Atom::Universal => {}
            Atom::Type(name) => out.push(Instruction::filter(
                FilterOp::TagName,
                FilterArgs::Name(name.as_str().into()),
            )),
            Atom::Id(name) => out.push(Instruction::filter(
                FilterOp::Id,
                FilterArgs::Name(name.as_str().into()),
            )),
            Atom::Class(name) => {
                classes.insert(name.as_str().into());
            }
            Atom::Attribute(attr) => out.push(lower_attribute(attr)),
        }
    }

    if !classes.is_empty() {
        out.push(Instruction::filter(
            FilterOp::Classes,
            FilterArgs::Classes(classes),
        ));
    }
}

fn lower_attribute(attr: &AttributeSelector) -> Instruction {
    let name: Box<str> = attr.name.as_str().into();
    let Some(matcher) = &attr.matcher else {
        return Instruction::filter(FilterOp::AttrPresence, FilterArgs::Name(name));
    };

    let op = match matcher.operator {
        AttrOperator::Exactly => FilterOp::AttrExactly,
        AttrOperator::Includes => FilterOp::AttrWord,
        AttrOperator::DashMatch => FilterOp::AttrBegin,
        AttrOperator::Prefix => FilterOp::AttrPrefix,
        AttrOperator::Suffix => FilterOp::AttrSuffix,
        AttrOperator::Substring => FilterOp::AttrSubstring,
    };
    Instruction::filter(
        op,
        FilterArgs::Attr {
            name,
            value: matcher.value.as_str().into(),
        },
    )
}

fn combinator_op(combinator: Combinator) -> CombinatorOp {
    match combinator {
        Combinator::Descendant => CombinatorOp::Descendant,
        Combinator::Child => CombinatorOp::Children,
        Combinator::NextSibling => CombinatorOp::SiblingNext,
        Combinator::SubsequentSibling => CombinatorOp::SiblingSubsequent,
    }
}
