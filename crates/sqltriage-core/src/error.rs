//! Error types for the repair engine.
//!
//! Per-branch parse failures are not represented here: the search treats them
//! as dead ends and recovers locally. Only invariant violations that make the
//! whole repair run meaningless surface as [`RepairError`].

use thiserror::Error;

/// Fatal errors from a repair run.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepairError {
    /// A position in the edited text could not be mapped back to the original
    /// query. The tracker and the textual edits are maintained in lockstep, so
    /// this indicates a bug rather than bad input.
    #[error("position {line}:{column} cannot be mapped back to the original query")]
    InvalidPosition { line: usize, column: usize },

    /// The supervised search worker went away without reporting a result.
    #[error("repair worker terminated unexpectedly")]
    WorkerFailed,
}
