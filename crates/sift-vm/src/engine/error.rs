//! Errors that can occur during query execution.

use sift_bytecode::{CombinatorOp, FilterOp};

/// The adapter cannot run the query.
///
/// Detected before any node is visited, so a query either fails up front or
/// produces its full result stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    #[error("adapter has no handler for filter `{0}`")]
    MissingFilterHandler(FilterOp),

    /// Also reported for `descendant` when only `reset` needs it to seed candidates.
    #[error("adapter has no handler for combinator `{0}`")]
    MissingCombinatorHandler(CombinatorOp),
}
