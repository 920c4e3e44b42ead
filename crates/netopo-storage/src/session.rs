//! [`TopologySession`]: the load/save lifecycle of one topology.
//!
//! A session owns a [`Graph`] and the store it came from. Opening loads the
//! persisted topology, or starts empty and immediately writes the empty
//! form when there is nothing usable to load. Closing saves. A session that
//! is dropped without being closed saves from `Drop` and logs a failure,
//! since `Drop` cannot return it; call [`TopologySession::close`] to get the
//! error instead.

use netopo_core::Graph;

use crate::error::StorageError;
use crate::traits::TopologyStore;

/// Scoped owner of a graph and its backing store.
#[derive(Debug)]
pub struct TopologySession<S: TopologyStore> {
    graph: Graph,
    store: S,
    bootstrapped: bool,
    closed: bool,
}

impl<S: TopologyStore> TopologySession<S> {
    /// Loads the topology from `store`.
    ///
    /// A missing, unreadable, or invalid store is not an error: the session
    /// starts with an empty graph and writes it back so the store holds a
    /// valid empty topology. Only a failure of that write is returned.
    pub fn open(mut store: S) -> Result<Self, StorageError> {
        match store.load() {
            Ok(graph) => {
                tracing::info!(
                    location = %store.location(),
                    vertices = graph.vertex_count(),
                    edges = graph.edge_count(),
                    "loaded topology"
                );
                Ok(TopologySession {
                    graph,
                    store,
                    bootstrapped: false,
                    closed: false,
                })
            }
            Err(err) => {
                match &err {
                    StorageError::NotFound { .. } => {
                        tracing::info!(location = %store.location(), "no topology yet, starting empty")
                    }
                    other => tracing::warn!(
                        location = %store.location(),
                        error = %other,
                        "discarding unusable topology, starting empty"
                    ),
                }
                let graph = Graph::new();
                store.save(&graph)?;
                Ok(TopologySession {
                    graph,
                    store,
                    bootstrapped: true,
                    closed: false,
                })
            }
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns `true` if `open` found nothing usable and started empty.
    pub fn was_bootstrapped(&self) -> bool {
        self.bootstrapped
    }

    /// Writes the current graph to the store.
    pub fn save(&mut self) -> Result<(), StorageError> {
        self.store.save(&self.graph)
    }

    /// Empties the graph and writes the empty topology to the store.
    ///
    /// The in-memory graph is cleared even if the write fails.
    pub fn clear_and_persist(&mut self) -> Result<(), StorageError> {
        self.graph.clear();
        tracing::info!(location = %self.store.location(), "cleared topology");
        self.save()
    }

    /// Saves and ends the session.
    ///
    /// The session counts as closed even if the save fails; `Drop` does not
    /// try again.
    pub fn close(mut self) -> Result<(), StorageError> {
        self.closed = true;
        self.store.save(&self.graph)
    }
}

impl<S: TopologyStore> Drop for TopologySession<S> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(err) = self.store.save(&self.graph) {
            tracing::error!(
                location = %self.store.location(),
                error = %err,
                "failed to save topology on drop"
            );
        }
    }
}
