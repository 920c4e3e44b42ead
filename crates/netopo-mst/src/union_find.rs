//! Disjoint-set forest over vertex keys.
//!
//! Uses full path compression in [`UnionFind::find`] and union by rank in
//! [`UnionFind::union`].

use std::collections::HashMap;

/// Disjoint sets of vertex keys.
///
/// A key whose parent is itself is the representative of its set. Rank is
/// an upper bound on the height of the tree under a representative.
#[derive(Debug, Clone, Default)]
pub struct UnionFind {
    parent: HashMap<String, String>,
    rank: HashMap<String, u32>,
}

impl UnionFind {
    /// Creates one singleton set per key. Repeated keys are ignored.
    pub fn new<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let mut uf = UnionFind::default();
        for key in keys {
            let key = key.into();
            if !uf.parent.contains_key(&key) {
                uf.rank.insert(key.clone(), 0);
                uf.parent.insert(key.clone(), key);
            }
        }
        uf
    }

    /// Number of keys tracked.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns the representative of `key`'s set.
    ///
    /// Every key on the path from `key` to the representative is re-pointed
    /// directly at the representative. A key that was never added is its
    /// own singleton representative and is not recorded.
    pub fn find(&mut self, key: &str) -> String {
        let mut path: Vec<String> = Vec::new();
        let mut current = key.to_string();
        loop {
            match self.parent.get(&current) {
                Some(parent) if *parent != current => {
                    let next = parent.clone();
                    path.push(std::mem::replace(&mut current, next));
                }
                _ => break,
            }
        }
        for node in path {
            self.parent.insert(node, current.clone());
        }
        current
    }

    /// Returns `true` if `a` and `b` are in the same set.
    pub fn same(&mut self, a: &str, b: &str) -> bool {
        self.find(a) == self.find(b)
    }

    /// Merges the sets of `a` and `b`.
    ///
    /// The representative of lower rank is attached under the other. On a
    /// tie, `a`'s representative becomes the root and its rank grows by
    /// one. Returns `false` if they were already in the same set. Keys that
    /// were never added are registered as singletons first.
    pub fn union(&mut self, a: &str, b: &str) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        for root in [&ra, &rb] {
            if !self.parent.contains_key(root) {
                self.parent.insert(root.clone(), root.clone());
                self.rank.insert(root.clone(), 0);
            }
        }

        let rank_a = self.rank_of(&ra);
        let rank_b = self.rank_of(&rb);
        if rank_a < rank_b {
            self.parent.insert(ra, rb);
        } else if rank_a > rank_b {
            self.parent.insert(rb, ra);
        } else {
            self.parent.insert(rb, ra.clone());
            self.rank.insert(ra, rank_a + 1);
        }
        true
    }

    /// Rank of `key`, zero for unknown keys.
    pub fn rank_of(&self, key: &str) -> u32 {
        self.rank.get(key).copied().unwrap_or(0)
    }

    /// Direct parent of `key` without compressing, for inspection.
    pub fn parent_of(&self, key: &str) -> Option<&str> {
        self.parent.get(key).map(String::as_str)
    }
}
