//! Cross-checks Kruskal against petgraph's minimum spanning forest on
//! random topologies.

use petgraph::algo::min_spanning_tree;
use petgraph::data::FromElements;
use petgraph::graph::UnGraph;
use proptest::prelude::*;

use netopo_core::{Cost, Graph};
use netopo_mst::{KruskalMst, UnionFind};

fn topology() -> impl Strategy<Value = Graph> {
    (1usize..12).prop_flat_map(|n| {
        proptest::collection::vec((0..n, 0..n, 0u32..50), 0..40).prop_map(move |links| {
            let mut g = Graph::new();
            for i in 0..n {
                g.insert_vertex(&format!("v{i}"));
            }
            for (a, b, c) in links {
                g.insert_edge(&format!("v{a}"), &format!("v{b}"), c);
            }
            g
        })
    })
}

fn petgraph_forest_cost(graph: &Graph) -> (u64, usize) {
    let pg = graph.to_petgraph();
    let forest: UnGraph<String, Cost> = UnGraph::from_elements(min_spanning_tree(&pg));
    let total = forest.edge_weights().map(|c| u64::from(*c)).sum();
    (total, forest.edge_count())
}

proptest! {
    #[test]
    fn total_cost_matches_petgraph(g in topology()) {
        let mst = KruskalMst::new().compute(&g);
        let (expected_cost, expected_edges) = petgraph_forest_cost(&g);
        prop_assert_eq!(mst.total_cost, expected_cost);
        prop_assert_eq!(mst.edges.len(), expected_edges);
        prop_assert_eq!(mst.tree_count(), g.connected_components());
    }

    #[test]
    fn accepted_edges_form_a_forest(g in topology()) {
        let mst = KruskalMst::new().compute(&g);
        let mut sets = UnionFind::new(g.all_vertices());
        for edge in &mst.edges {
            prop_assert!(sets.union(edge.u(), edge.v()), "cycle through {}", edge);
            prop_assert_eq!(g.has_edge(edge.u(), edge.v()), Some(edge.cost()));
        }
        for pair in mst.edges.windows(2) {
            prop_assert!(pair[0].cost() <= pair[1].cost());
        }
    }
}
