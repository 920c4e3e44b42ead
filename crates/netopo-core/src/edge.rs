//! The undirected weighted [`Edge`] value type.
//!
//! An edge models a physical link between two devices. Edges are immutable
//! once built and are ordered by cost only, which is the order Kruskal's
//! algorithm consumes them in.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Link cost. Non-negative by construction.
pub type Cost = u32;

/// Largest cost a link may carry. The persisted format stores costs as
/// signed 32-bit integers.
pub const MAX_COST: Cost = i32::MAX as Cost;

/// An undirected link between two vertex keys.
///
/// `Edge::new("A", "B", 5)` and `Edge::new("B", "A", 5)` describe the same
/// link; use [`Edge::same_link`] to compare that way. The derived
/// `PartialEq` is field-wise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    u: String,
    v: String,
    cost: Cost,
}

impl Edge {
    /// Creates an edge between `u` and `v`.
    ///
    /// Self-loops are representable here; [`Graph`](crate::Graph) refuses
    /// to store them.
    pub fn new(u: impl Into<String>, v: impl Into<String>, cost: Cost) -> Self {
        Edge {
            u: u.into(),
            v: v.into(),
            cost,
        }
    }

    /// First endpoint.
    pub fn u(&self) -> &str {
        &self.u
    }

    /// Second endpoint.
    pub fn v(&self) -> &str {
        &self.v
    }

    /// Link cost.
    pub fn cost(&self) -> Cost {
        self.cost
    }

    /// Returns `true` if both endpoints are the same key.
    pub fn is_self_loop(&self) -> bool {
        self.u == self.v
    }

    /// Orders two edges by cost, ascending. Edges of equal cost compare
    /// `Equal` regardless of their endpoints.
    pub fn cmp_by_cost(&self, other: &Edge) -> Ordering {
        self.cost.cmp(&other.cost)
    }

    /// Returns the same link with endpoints in ascending key order.
    pub fn canonical(&self) -> Edge {
        if self.u <= self.v {
            self.clone()
        } else {
            Edge::new(self.v.clone(), self.u.clone(), self.cost)
        }
    }

    /// Returns `true` if `other` connects the same pair of keys at the same
    /// cost, in either direction.
    pub fn same_link(&self, other: &Edge) -> bool {
        self.cost == other.cost
            && ((self.u == other.u && self.v == other.v)
                || (self.u == other.v && self.v == other.u))
    }
}

/// Formats as `u v cost`, the line format used by the exporter.
impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.u, self.v, self.cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_return_construction_values() {
        let e = Edge::new("R1", "R2", 10);
        assert_eq!(e.u(), "R1");
        assert_eq!(e.v(), "R2");
        assert_eq!(e.cost(), 10);
        assert!(!e.is_self_loop());
    }

    #[test]
    fn cmp_by_cost_ignores_endpoints() {
        let cheap = Edge::new("Z", "Y", 1);
        let dear = Edge::new("A", "B", 9);
        assert_eq!(cheap.cmp_by_cost(&dear), Ordering::Less);
        assert_eq!(dear.cmp_by_cost(&cheap), Ordering::Greater);

        let tie = Edge::new("C", "D", 1);
        assert_eq!(cheap.cmp_by_cost(&tie), Ordering::Equal);
    }

    #[test]
    fn stable_sort_keeps_tie_order() {
        let mut edges = vec![
            Edge::new("C", "D", 2),
            Edge::new("A", "B", 1),
            Edge::new("E", "F", 2),
            Edge::new("G", "H", 1),
        ];
        edges.sort_by(Edge::cmp_by_cost);
        let order: Vec<&str> = edges.iter().map(Edge::u).collect();
        assert_eq!(order, vec!["A", "G", "C", "E"]);
    }

    #[test]
    fn canonical_orders_endpoints() {
        let e = Edge::new("b", "a", 3);
        let c = e.canonical();
        assert_eq!((c.u(), c.v(), c.cost()), ("a", "b", 3));
        assert_eq!(c.canonical(), c);
    }

    #[test]
    fn same_link_is_direction_agnostic() {
        let ab = Edge::new("A", "B", 5);
        assert!(ab.same_link(&Edge::new("B", "A", 5)));
        assert!(!ab.same_link(&Edge::new("A", "B", 6)));
        assert!(!ab.same_link(&Edge::new("A", "C", 5)));
        assert_ne!(ab, Edge::new("B", "A", 5));
    }

    #[test]
    fn self_loop_is_representable() {
        assert!(Edge::new("X", "X", 0).is_self_loop());
    }

    #[test]
    fn display_is_export_line() {
        assert_eq!(Edge::new("R1", "R2", 10).to_string(), "R1 R2 10");
    }

    #[test]
    fn max_cost_fits_signed_32_bit() {
        assert_eq!(i32::try_from(MAX_COST).ok(), Some(i32::MAX));
    }

    #[test]
    fn serde_roundtrip() {
        let e = Edge::new("core-1", "edge-7", 42);
        let json = serde_json::to_string(&e).unwrap();
        let back: Edge = serde_json::from_str(&json).unwrap();
        assert_eq!(e, back);
    }
}
