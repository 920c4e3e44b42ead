//! Storage error types for netopo-storage.
//!
//! On load, every variant means "no usable persisted state" and a
//! [`TopologySession`](crate::TopologySession) starts empty. On save, the
//! error is returned to the caller.

use netopo_core::CoreError;
use thiserror::Error;

/// Errors produced by storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The store holds no persisted topology yet.
    #[error("no persisted topology at {location}")]
    NotFound { location: String },

    /// Magic number or format version did not match.
    #[error("invalid header: magic={magic:#010x}, version={version}")]
    InvalidHeader { magic: i32, version: i32 },

    /// The body could not be decoded.
    #[error("corrupt topology data: {reason}")]
    Corrupt { reason: String },

    /// The body decoded but violates a graph invariant.
    #[error("inconsistent topology data: {0}")]
    Inconsistent(#[from] CoreError),

    /// The backend refused the write.
    #[error("write rejected by {location}")]
    WriteRejected { location: String },
}
