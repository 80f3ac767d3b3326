//! Pluggable node semantics.
//!
//! An adapter is two dispatch tables indexed by opcode: one maps a filter's
//! operands to a node predicate, the other maps a candidate stream to the
//! stream of related nodes. Either table may have gaps; the VM refuses queries
//! that need a missing entry.

use std::fmt;

use sift_bytecode::{CombinatorOp, FilterArgs, FilterOp};

/// Node test built once per filter instruction.
pub type Predicate<'t, N> = Box<dyn Fn(&N) -> bool + 't>;

/// Lazy stream of nodes.
pub type NodeIter<'t, N> = Box<dyn Iterator<Item = N> + 't>;

/// Builds the predicate for one filter instruction from its operands.
pub type FilterHandler<'t, N> = Box<dyn Fn(&FilterArgs) -> Predicate<'t, N> + 't>;

/// Maps candidates to the nodes reached through one relationship.
pub type CombinatorHandler<'t, N> = Box<dyn Fn(NodeIter<'t, N>) -> NodeIter<'t, N> + 't>;

pub struct Adapter<'t, N> {
    filters: [Option<FilterHandler<'t, N>>; FilterOp::COUNT],
    combinators: [Option<CombinatorHandler<'t, N>>; CombinatorOp::COUNT],
}

impl<'t, N> Adapter<'t, N> {
    pub fn builder() -> AdapterBuilder<'t, N> {
        AdapterBuilder {
            adapter: Self {
                filters: [const { None }; FilterOp::COUNT],
                combinators: [const { None }; CombinatorOp::COUNT],
            },
        }
    }

    pub fn filter(&self, op: FilterOp) -> Option<&FilterHandler<'t, N>> {
        self.filters[op.index()].as_ref()
    }

    pub fn combinator(&self, op: CombinatorOp) -> Option<&CombinatorHandler<'t, N>> {
        self.combinators[op.index()].as_ref()
    }

    /// Returns `true` if every filter and combinator opcode has a handler.
    pub fn is_complete(&self) -> bool {
        self.filters.iter().all(Option::is_some) && self.combinators.iter().all(Option::is_some)
    }
}

impl<N> fmt::Debug for Adapter<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let filters: Vec<_> = FilterOp::ALL
            .iter()
            .filter(|op| self.filter(**op).is_some())
            .collect();
        let combinators: Vec<_> = CombinatorOp::ALL
            .iter()
            .filter(|op| self.combinator(**op).is_some())
            .collect();
        f.debug_struct("Adapter")
            .field("filters", &filters)
            .field("combinators", &combinators)
            .finish()
    }
}

/// Registers handlers one opcode at a time. Later registrations replace earlier ones.
pub struct AdapterBuilder<'t, N> {
    adapter: Adapter<'t, N>,
}

impl<'t, N> AdapterBuilder<'t, N> {
    pub fn filter<F>(mut self, op: FilterOp, handler: F) -> Self
    where
        F: Fn(&FilterArgs) -> Predicate<'t, N> + 't,
    {
        self.adapter.filters[op.index()] = Some(Box::new(handler));
        self
    }

    pub fn combinator<F>(mut self, op: CombinatorOp, handler: F) -> Self
    where
        F: Fn(NodeIter<'t, N>) -> NodeIter<'t, N> + 't,
    {
        self.adapter.combinators[op.index()] = Some(Box::new(handler));
        self
    }

    pub fn build(self) -> Adapter<'t, N> {
        self.adapter
    }
}
