//! Binary file implementation of [`TopologyStore`].

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use netopo_core::Graph;

use crate::codec;
use crate::error::StorageError;
use crate::traits::TopologyStore;

/// Stores one topology in a binary file using the [`codec`] layout.
///
/// The file is opened, read or written in full, and closed inside each
/// call.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store backed by `path`. Nothing is read or created until
    /// the first `load` or `save`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TopologyStore for FileStore {
    fn load(&self) -> Result<Graph, StorageError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StorageError::NotFound {
                    location: self.location(),
                })
            }
            Err(e) => return Err(e.into()),
        };
        codec::decode(&bytes)
    }

    fn save(&mut self, graph: &Graph) -> Result<(), StorageError> {
        let bytes = codec::encode(graph);
        let mut file = File::create(&self.path)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
        tracing::debug!(
            path = %self.path.display(),
            bytes = bytes.len(),
            vertices = graph.vertex_count(),
            "saved topology"
        );
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
