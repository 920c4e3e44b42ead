//! The [`TopologyStore`] trait defining the storage contract for topologies.
//!
//! A store holds at most one topology. Backends are swappable: the session
//! and the CLI only talk to this trait.

use netopo_core::Graph;

use crate::error::StorageError;

/// The storage contract for a single persisted topology.
///
/// The trait is synchronous; every call runs to completion and holds no
/// resources (file handles) between calls.
pub trait TopologyStore {
    /// Loads the persisted topology.
    ///
    /// Returns [`StorageError::NotFound`] when nothing has been saved yet,
    /// and the codec errors when the stored bytes are not a valid topology.
    fn load(&self) -> Result<Graph, StorageError>;

    /// Overwrites the persisted topology with `graph`.
    fn save(&mut self, graph: &Graph) -> Result<(), StorageError>;

    /// Human-readable location, for logs and messages.
    fn location(&self) -> String;
}

/// Lets a session borrow a store, so the caller can inspect it after the
/// session is gone.
impl<S: TopologyStore + ?Sized> TopologyStore for &mut S {
    fn load(&self) -> Result<Graph, StorageError> {
        (**self).load()
    }

    fn save(&mut self, graph: &Graph) -> Result<(), StorageError> {
        (**self).save(graph)
    }

    fn location(&self) -> String {
        (**self).location()
    }
}
