//! Core data model for netopo network topologies.
//!
//! A topology is an undirected weighted graph: devices are vertices keyed by
//! name, links are edges carrying an integer cost. [`Graph`] owns the
//! adjacency structure and is the only place it can be mutated, so the
//! undirected duality invariant holds for every value reachable through the
//! public API.
//!
//! # Modules
//!
//! - [`edge`]: the immutable [`Edge`] value type
//! - [`graph`]: the [`Graph`] adjacency container
//! - [`topology`]: line-oriented text topology parser
//! - [`export`]: plain-text vertex/edge listings
//! - [`error`]: [`CoreError`]

pub mod edge;
pub mod error;
pub mod export;
pub mod graph;
pub mod topology;

// Re-export commonly used types
pub use edge::{Cost, Edge, MAX_COST};
pub use error::CoreError;
pub use graph::{Graph, ImportReport, Neighbor};
pub use topology::{Diagnostic, DiagnosticKind, ParsedTopology, TopologyError};
