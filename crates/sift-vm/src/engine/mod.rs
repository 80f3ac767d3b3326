//! Runtime engine for executing compiled selectors.
//!
//! The VM walks the instruction stream of a `CompiledQuery`, delegating every
//! node-level question to the handlers of an [`Adapter`].

mod access;
mod adapter;
mod error;
mod trace;
mod vm;

#[cfg(test)]
mod test_tree;

pub use access::NodeAccess;
pub use adapter::{Adapter, AdapterBuilder, CombinatorHandler, FilterHandler, NodeIter, Predicate};
pub use error::RuntimeError;
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity};
pub use vm::{Matches, VM};
