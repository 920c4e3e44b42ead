//! Core error types for netopo-core.
//!
//! Graph mutations never fail with an error: policy violations (unknown
//! endpoints, self-loops, duplicates) are reported as `false` outcomes.
//! [`CoreError`] covers the remaining failure modes, bulk construction from
//! untrusted adjacency data and file I/O.

use thiserror::Error;

/// Core errors produced by the netopo-core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Adjacency data handed to [`Graph::from_adjacency`](crate::Graph::from_adjacency)
    /// violates a graph invariant.
    #[error("graph inconsistency: {reason}")]
    GraphInconsistency { reason: String },

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
