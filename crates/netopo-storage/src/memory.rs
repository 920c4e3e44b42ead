//! In-memory implementation of [`TopologyStore`].
//!
//! [`InMemoryStore`] keeps the encoded bytes instead of a `Graph`, so it
//! goes through the same codec as the file backend. It backs tests and
//! dry runs where nothing should touch the disk.

use netopo_core::Graph;

use crate::codec;
use crate::error::StorageError;
use crate::traits::TopologyStore;

/// In-memory implementation of [`TopologyStore`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    bytes: Option<Vec<u8>>,
    reject_writes: bool,
    saves: usize,
}

impl InMemoryStore {
    /// Creates an empty store; `load` reports `NotFound` until the first
    /// save.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `bytes`, valid or not.
    pub fn with_bytes(bytes: Vec<u8>) -> Self {
        InMemoryStore {
            bytes: Some(bytes),
            ..Self::default()
        }
    }

    /// Makes every subsequent `save` fail with
    /// [`StorageError::WriteRejected`].
    pub fn reject_writes(mut self) -> Self {
        self.reject_writes = true;
        self
    }

    /// The currently stored bytes.
    pub fn bytes(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl TopologyStore for InMemoryStore {
    fn load(&self) -> Result<Graph, StorageError> {
        match &self.bytes {
            Some(bytes) => codec::decode(bytes),
            None => Err(StorageError::NotFound {
                location: self.location(),
            }),
        }
    }

    fn save(&mut self, graph: &Graph) -> Result<(), StorageError> {
        if self.reject_writes {
            return Err(StorageError::WriteRejected {
                location: self.location(),
            });
        }
        self.bytes = Some(codec::encode(graph));
        self.saves += 1;
        Ok(())
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_not_found() {
        let store = InMemoryStore::new();
        assert!(matches!(store.load(), Err(StorageError::NotFound { .. })));
        assert!(store.bytes().is_none());
    }

    #[test]
    fn save_then_load() {
        let mut store = InMemoryStore::new();
        let mut g = Graph::new();
        g.insert_vertex("x");
        store.save(&g).unwrap();
        assert_eq!(store.load().unwrap(), g);
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn garbage_bytes_fail_to_load() {
        let store = InMemoryStore::with_bytes(vec![1, 2, 3]);
        assert!(matches!(store.load(), Err(StorageError::Corrupt { .. })));
    }

    #[test]
    fn rejected_writes_keep_old_bytes() {
        let mut store = InMemoryStore::with_bytes(codec::encode(&Graph::new())).reject_writes();
        let mut g = Graph::new();
        g.insert_vertex("x");
        assert!(matches!(store.save(&g), Err(StorageError::WriteRejected { .. })));
        assert_eq!(store.load().unwrap(), Graph::new());
        assert_eq!(store.save_count(), 0);
    }
}
