//! Kruskal's minimum spanning tree over a topology snapshot.
//!
//! Time: O(E log E) for the sort plus O(E α(V)) for union-find.

use serde::{Deserialize, Serialize};

use netopo_core::{Edge, Graph};

use crate::union_find::UnionFind;

/// Edges accepted by Kruskal's algorithm and their total cost.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MstResult {
    /// Accepted edges, in the order they were accepted (ascending cost).
    pub edges: Vec<Edge>,
    /// Sum of the accepted edge costs.
    pub total_cost: u64,
    /// Number of distinct vertices in the snapshot, counting edge
    /// endpoints that were not listed as vertices.
    pub vertex_count: usize,
}

impl MstResult {
    /// Number of trees in the spanning forest. Each isolated vertex is a
    /// tree of its own; an empty graph has none.
    pub fn tree_count(&self) -> usize {
        // A forest over n vertices with k edges has n - k trees. Fields are
        // public, so a hand-built result may not be a forest.
        self.vertex_count.saturating_sub(self.edges.len())
    }

    /// Returns `true` if the result connects every vertex in a single tree.
    pub fn is_spanning_tree(&self) -> bool {
        self.tree_count() == 1
    }
}

/// Kruskal's algorithm.
///
/// The union-find state lives only for the duration of one computation.
#[derive(Debug, Default)]
pub struct KruskalMst;

impl KruskalMst {
    /// Creates the algorithm; it holds no state between computations.
    pub fn new() -> Self {
        KruskalMst
    }

    /// Computes the minimum spanning forest of `graph`.
    pub fn compute(&self, graph: &Graph) -> MstResult {
        self.compute_from_parts(graph.all_vertices(), graph.edges_unique())
    }

    /// Computes the minimum spanning forest of a raw snapshot.
    ///
    /// Duplicate vertex keys are ignored. Edges are sorted by cost with a
    /// stable sort, so among equal-cost edges the earlier one in `edges`
    /// wins. An edge endpoint missing from `vertices` is added as a vertex
    /// of its own.
    pub fn compute_from_parts(&self, mut vertices: Vec<String>, mut edges: Vec<Edge>) -> MstResult {
        for edge in &edges {
            vertices.push(edge.u().to_string());
            vertices.push(edge.v().to_string());
        }
        vertices.sort();
        vertices.dedup();
        edges.sort_by(Edge::cmp_by_cost);

        let vertex_count = vertices.len();
        let mut sets = UnionFind::new(vertices);
        let mut result = MstResult {
            edges: Vec::new(),
            total_cost: 0,
            vertex_count,
        };

        for edge in edges {
            if sets.union(edge.u(), edge.v()) {
                tracing::trace!(u = edge.u(), v = edge.v(), cost = edge.cost(), "accepted edge");
                result.total_cost += u64::from(edge.cost());
                result.edges.push(edge);
            } else {
                tracing::trace!(u = edge.u(), v = edge.v(), cost = edge.cost(), "rejected edge: cycle");
            }
        }

        tracing::debug!(
            accepted = result.edges.len(),
            total_cost = result.total_cost,
            trees = result.tree_count(),
            "computed minimum spanning forest"
        );
        result
    }
}
