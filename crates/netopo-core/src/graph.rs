//! Graph: the undirected adjacency container for a network topology.
//!
//! [`Graph`] maps each vertex key to the ordered list of its neighbors and
//! link costs. Every undirected link is stored twice, once under each
//! endpoint. The adjacency map is private and every mutation goes through a
//! method that writes or removes both halves together, so the following
//! hold for any `Graph` reachable through the public API:
//!
//! - every present vertex has an adjacency entry (possibly empty);
//! - `a` lists `(b, c)` if and only if `b` lists `(a, c)`;
//! - a pair of vertices is linked at most once;
//! - no vertex lists itself, and no list names an absent vertex.
//!
//! # Mutation policy
//!
//! Mutations never return errors. A request that violates the policy
//! (linking an unknown vertex, a self-loop, a duplicate vertex) is a silent
//! no-op reported as `false`. Callers that need to tell "already true"
//! from "just became true" use the return value or query first with
//! [`Graph::has_vertex`] / [`Graph::has_edge`].
//!
//! Vertex order is insertion order. Removing a vertex keeps the relative
//! order of the others, so the persisted form and [`Graph::edges_unique`]
//! are deterministic for a given mutation history.

use std::collections::HashMap;
use std::path::Path;

use indexmap::IndexMap;
use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::edge::{Cost, Edge, MAX_COST};
use crate::error::CoreError;
use crate::topology::{self, Diagnostic, ParsedTopology, TopologyError};

/// One entry of an adjacency list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighbor {
    pub key: String,
    pub cost: Cost,
}

type Adjacency = SmallVec<[Neighbor; 4]>;

/// Outcome of [`Graph::import_from_txt`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Vertices that did not exist before the import.
    pub vertices_added: usize,
    /// Edges that did not exist before the import.
    pub edges_added: usize,
    /// Parsed edges the graph refused: already present, unknown endpoint,
    /// or self-loop.
    pub edges_skipped: usize,
    /// Per-line parser diagnostics.
    pub diagnostics: Vec<Diagnostic>,
}

/// An undirected weighted topology.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Graph {
    adjacency: IndexMap<String, Adjacency>,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Graph {
            adjacency: IndexMap::new(),
        }
    }

    /// Builds a graph from raw adjacency lists, as read back from storage.
    ///
    /// Unlike the mutation methods, which silently ignore bad requests, this
    /// rejects input that breaks any graph invariant: empty or duplicate
    /// keys, self-loops, costs above [`MAX_COST`], neighbors that are not
    /// vertices, repeated neighbors, and links recorded on one side only or
    /// with different costs on each side.
    pub fn from_adjacency<I, N>(entries: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = (String, N)>,
        N: IntoIterator<Item = (String, Cost)>,
    {
        let mut adjacency: IndexMap<String, Adjacency> = IndexMap::new();
        for (key, neighbors) in entries {
            if key.is_empty() {
                return Err(inconsistency("empty vertex key".to_string()));
            }
            let list: Adjacency = neighbors
                .into_iter()
                .map(|(key, cost)| Neighbor { key, cost })
                .collect();
            if adjacency.contains_key(&key) {
                return Err(inconsistency(format!("duplicate vertex '{}'", key)));
            }
            adjacency.insert(key, list);
        }

        // Every directed entry, keyed by (vertex, neighbor), so both the
        // repeat check and the reverse lookup are constant time.
        let mut links: HashMap<(&str, &str), Cost> = HashMap::new();
        for (key, list) in &adjacency {
            for n in list {
                if n.key == *key {
                    return Err(inconsistency(format!("self-loop on '{}'", key)));
                }
                if n.cost > MAX_COST {
                    return Err(inconsistency(format!(
                        "cost {} on '{}'-'{}' exceeds {}",
                        n.cost, key, n.key, MAX_COST
                    )));
                }
                if !adjacency.contains_key(&n.key) {
                    return Err(inconsistency(format!(
                        "'{}' lists unknown vertex '{}'",
                        key, n.key
                    )));
                }
                if links.insert((key.as_str(), n.key.as_str()), n.cost).is_some() {
                    return Err(inconsistency(format!(
                        "'{}' lists '{}' more than once",
                        key, n.key
                    )));
                }
            }
        }

        for (key, list) in &adjacency {
            for n in list {
                match links.get(&(n.key.as_str(), key.as_str())) {
                    Some(&cost) if cost == n.cost => {}
                    Some(&cost) => {
                        return Err(inconsistency(format!(
                            "link '{}'-'{}' has cost {} on one side and {} on the other",
                            key, n.key, n.cost, cost
                        )))
                    }
                    None => {
                        return Err(inconsistency(format!(
                            "link '{}'-'{}' is missing its reverse entry",
                            key, n.key
                        )))
                    }
                }
            }
        }
        drop(links);

        Ok(Graph { adjacency })
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Returns `true` if `key` is a vertex.
    pub fn has_vertex(&self, key: &str) -> bool {
        self.adjacency.contains_key(key)
    }

    /// Returns the cost of the link between `a` and `b`, or `None` if either
    /// vertex is absent or they are not linked.
    pub fn has_edge(&self, a: &str, b: &str) -> Option<Cost> {
        self.adjacency
            .get(a)?
            .iter()
            .find(|n| n.key == b)
            .map(|n| n.cost)
    }

    /// Returns the adjacency list of `key`, in insertion order.
    pub fn neighbors(&self, key: &str) -> Option<&[Neighbor]> {
        self.adjacency.get(key).map(|list| list.as_slice())
    }

    /// Number of links incident to `key`, or `None` if it is not a vertex.
    pub fn degree(&self, key: &str) -> Option<usize> {
        self.adjacency.get(key).map(|list| list.len())
    }

    /// Iterates over every vertex and its adjacency list, in vertex order.
    pub fn adjacency(&self) -> impl Iterator<Item = (&str, &[Neighbor])> + '_ {
        self.adjacency
            .iter()
            .map(|(key, list)| (key.as_str(), list.as_slice()))
    }

    /// Returns every vertex key. Callers needing a canonical order sort the
    /// result themselves.
    pub fn all_vertices(&self) -> Vec<String> {
        self.adjacency.keys().cloned().collect()
    }

    /// Returns each undirected link exactly once.
    ///
    /// A link stored under both `u` and `v` is emitted only from the side
    /// whose key sorts first, as `Edge(u, v)` with `u < v`.
    pub fn edges_unique(&self) -> Vec<Edge> {
        let mut edges = Vec::with_capacity(self.edge_count());
        for (key, list) in &self.adjacency {
            for n in list {
                if key.as_str() < n.key.as_str() {
                    edges.push(Edge::new(key.clone(), n.key.clone(), n.cost));
                }
            }
        }
        edges
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected links.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|list| list.len()).sum::<usize>() / 2
    }

    /// Returns `true` if the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Adds a vertex with no links.
    ///
    /// Returns `false` without changing anything if `key` already exists or
    /// is empty.
    pub fn insert_vertex(&mut self, key: &str) -> bool {
        if key.is_empty() || self.adjacency.contains_key(key) {
            return false;
        }
        self.adjacency.insert(key.to_string(), Adjacency::new());
        tracing::debug!(vertex = key, "inserted vertex");
        true
    }

    /// Links `a` and `b` at `cost`.
    ///
    /// Returns `false` without changing anything if either vertex is absent,
    /// `a == b`, `cost` exceeds [`MAX_COST`], or the two are already linked
    /// (the existing cost stands).
    pub fn insert_edge(&mut self, a: &str, b: &str, cost: Cost) -> bool {
        if a == b || cost > MAX_COST {
            tracing::debug!(a, b, cost, "rejected edge: self-loop or cost out of range");
            return false;
        }
        if !self.has_vertex(a) || !self.has_vertex(b) {
            tracing::debug!(a, b, "rejected edge: unknown endpoint");
            return false;
        }
        if self.has_edge(a, b).is_some() {
            return false;
        }

        // Both endpoints were checked above; write the two halves together.
        if let Some(list) = self.adjacency.get_mut(a) {
            list.push(Neighbor {
                key: b.to_string(),
                cost,
            });
        }
        if let Some(list) = self.adjacency.get_mut(b) {
            list.push(Neighbor {
                key: a.to_string(),
                cost,
            });
        }
        tracing::debug!(a, b, cost, "inserted edge");
        true
    }

    /// Removes the link between `a` and `b` from both adjacency lists.
    ///
    /// Returns `false` if there was no such link.
    pub fn delete_undirected_edge(&mut self, a: &str, b: &str) -> bool {
        if self.has_edge(a, b).is_none() {
            return false;
        }
        if let Some(list) = self.adjacency.get_mut(a) {
            list.retain(|n| n.key != b);
        }
        if let Some(list) = self.adjacency.get_mut(b) {
            list.retain(|n| n.key != a);
        }
        tracing::debug!(a, b, "deleted edge");
        true
    }

    /// Removes `key` and every link that references it.
    ///
    /// Returns `false` if `key` was not a vertex.
    pub fn delete_vertex(&mut self, key: &str) -> bool {
        let Some(list) = self.adjacency.shift_remove(key) else {
            return false;
        };
        for n in &list {
            if let Some(other) = self.adjacency.get_mut(&n.key) {
                other.retain(|m| m.key != key);
            }
        }
        tracing::debug!(vertex = key, links = list.len(), "deleted vertex");
        true
    }

    /// Removes every vertex and link.
    pub fn clear(&mut self) {
        self.adjacency.clear();
    }

    // -----------------------------------------------------------------------
    // Import
    // -----------------------------------------------------------------------

    /// Parses a text topology file and applies it to this graph.
    ///
    /// The graph is untouched if the parse fails as a whole. Otherwise all
    /// parsed vertices are inserted before any edge, so edges find their
    /// declared endpoints. Edges the graph refuses are counted, not
    /// reported as errors.
    pub fn import_from_txt(&mut self, path: impl AsRef<Path>) -> Result<ImportReport, TopologyError> {
        let parsed = topology::parse_file(path)?;
        Ok(self.apply_topology(parsed))
    }

    /// Applies an already parsed topology: vertices first, then edges.
    pub fn apply_topology(&mut self, parsed: ParsedTopology) -> ImportReport {
        let mut report = ImportReport {
            diagnostics: parsed.diagnostics,
            ..ImportReport::default()
        };
        for key in &parsed.vertices {
            if self.insert_vertex(key) {
                report.vertices_added += 1;
            }
        }
        for edge in &parsed.edges {
            if self.insert_edge(edge.u(), edge.v(), edge.cost()) {
                report.edges_added += 1;
            } else {
                report.edges_skipped += 1;
            }
        }
        tracing::info!(
            vertices_added = report.vertices_added,
            edges_added = report.edges_added,
            edges_skipped = report.edges_skipped,
            "applied topology"
        );
        report
    }

    // -----------------------------------------------------------------------
    // petgraph bridge
    // -----------------------------------------------------------------------

    /// Builds a petgraph view of this topology.
    ///
    /// Node weights are vertex keys, in vertex order; edge weights are
    /// costs, one petgraph edge per undirected link.
    pub fn to_petgraph(&self) -> UnGraph<String, Cost> {
        let mut pg = UnGraph::with_capacity(self.vertex_count(), self.edge_count());
        let mut index: HashMap<&str, NodeIndex> = HashMap::with_capacity(self.vertex_count());
        for key in self.adjacency.keys() {
            index.insert(key.as_str(), pg.add_node(key.clone()));
        }
        for edge in self.edges_unique() {
            pg.add_edge(index[edge.u()], index[edge.v()], edge.cost());
        }
        pg
    }

    /// Number of connected components. Isolated vertices count as one each.
    pub fn connected_components(&self) -> usize {
        petgraph::algo::connected_components(&self.to_petgraph())
    }
}

fn inconsistency(reason: String) -> CoreError {
    CoreError::GraphInconsistency { reason }
}
