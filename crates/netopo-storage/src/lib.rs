//! Persistence for netopo topologies.
//!
//! Provides the [`TopologyStore`] trait defining the storage contract, the
//! [`FileStore`] binary-file backend and the [`InMemoryStore`] backend, plus
//! [`TopologySession`], the scoped owner that loads a graph on open and
//! saves it on close.
//!
//! # Modules
//!
//! - [`codec`]: the binary layout, `encode` / `decode`
//! - [`error`]: StorageError enum with all failure modes
//! - [`traits`]: TopologyStore trait definition
//! - [`file`]: FileStore implementation
//! - [`memory`]: InMemoryStore implementation
//! - [`session`]: TopologySession load/save lifecycle

pub mod codec;
pub mod error;
pub mod file;
pub mod memory;
pub mod session;
pub mod traits;

// Re-export key types for ergonomic use.
pub use codec::{decode, encode, FORMAT_MAGIC, FORMAT_VERSION};
pub use error::StorageError;
pub use file::FileStore;
pub use memory::InMemoryStore;
pub use session::TopologySession;
pub use traits::TopologyStore;
