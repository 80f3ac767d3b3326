//! Runtime VM for executing compiled sift selectors.
//!
//! This crate provides the virtual machine that interprets an instruction
//! stream against any tree exposed through an [`Adapter`], producing a lazy
//! stream of matching nodes.

pub mod engine;

// Re-export commonly used items at crate root
pub use engine::{
    Adapter, AdapterBuilder, CombinatorHandler, FilterHandler, Matches, NodeAccess, NodeIter,
    NoopTracer, Predicate, PrintTracer, RuntimeError, Tracer, VM, Verbosity,
};
