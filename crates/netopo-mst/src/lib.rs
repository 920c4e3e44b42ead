//! Minimum spanning tree computation for netopo topologies.
//!
//! [`KruskalMst`] snapshots a [`Graph`](netopo_core::Graph), sorts its links
//! by cost and accepts every link that joins two different components,
//! tracked with a string-keyed [`UnionFind`]. A disconnected topology yields
//! a minimum spanning forest, one tree per component.

pub mod kruskal;
pub mod union_find;

pub use kruskal::{KruskalMst, MstResult};
pub use union_find::UnionFind;
