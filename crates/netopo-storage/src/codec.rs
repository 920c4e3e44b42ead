//! Binary layout of a persisted topology.
//!
//! ```text
//! [MAGIC: i32]
//! [VERSION: i32]
//! [VERTEX_COUNT: i32]
//! VERTEX_COUNT × {
//!     [KEY_LEN: i32] [KEY: KEY_LEN bytes, UTF-8]
//!     [DEGREE: i32]
//!     DEGREE × {
//!         [NEIGHBOR_KEY_LEN: i32] [NEIGHBOR_KEY: bytes]
//!         [COST: i32]
//!     }
//! }
//! ```
//!
//! All integers are little-endian. Every undirected link appears twice, once
//! in each endpoint's list, exactly as the graph holds it in memory.

use netopo_core::{Cost, Graph};

use crate::error::StorageError;

/// Format tag, the bytes `NETO` when read as little-endian.
pub const FORMAT_MAGIC: i32 = 0x4F54_454E;

/// Current format revision.
pub const FORMAT_VERSION: i32 = 1;

/// Size of the header plus the vertex count of an empty topology.
pub const EMPTY_LEN: usize = 12;

/// Serializes `graph`, vertices and neighbors in graph order.
pub fn encode(graph: &Graph) -> Vec<u8> {
    let mut buf = Vec::with_capacity(EMPTY_LEN + graph.vertex_count() * 16);
    put_i32(&mut buf, FORMAT_MAGIC);
    put_i32(&mut buf, FORMAT_VERSION);

    // Vertex counts, degrees and key lengths stay far below i32::MAX, and
    // the graph caps costs at MAX_COST.
    put_i32(&mut buf, graph.vertex_count() as i32);
    for (key, neighbors) in graph.adjacency() {
        put_str(&mut buf, key);
        put_i32(&mut buf, neighbors.len() as i32);
        for n in neighbors {
            put_str(&mut buf, &n.key);
            put_i32(&mut buf, n.cost as i32);
        }
    }
    buf
}

/// Deserializes a topology.
///
/// Fails with [`StorageError::InvalidHeader`] on a magic or version
/// mismatch, [`StorageError::Corrupt`] when the body is truncated, has
/// trailing bytes, negative lengths or costs, or non-UTF-8 keys, and
/// [`StorageError::Inconsistent`] when it decodes to adjacency lists that
/// break a graph invariant.
pub fn decode(data: &[u8]) -> Result<Graph, StorageError> {
    let mut r = Reader { data, pos: 0 };

    let magic = r.i32("magic")?;
    let version = r.i32("version")?;
    if magic != FORMAT_MAGIC || version != FORMAT_VERSION {
        return Err(StorageError::InvalidHeader { magic, version });
    }

    let vertex_count = r.len("vertex count")?;
    // Each vertex needs at least 8 bytes (key length + degree); don't trust
    // the count for preallocation beyond that.
    let mut entries = Vec::with_capacity(vertex_count.min(r.remaining() / 8));
    for _ in 0..vertex_count {
        let key = r.string("vertex key")?;
        let degree = r.len("degree")?;
        let mut neighbors = Vec::with_capacity(degree.min(r.remaining() / 8));
        for _ in 0..degree {
            let neighbor = r.string("neighbor key")?;
            let cost = r.i32("cost")?;
            let cost = Cost::try_from(cost).map_err(|_| StorageError::Corrupt {
                reason: format!("negative cost {} on '{}'-'{}'", cost, key, neighbor),
            })?;
            neighbors.push((neighbor, cost));
        }
        entries.push((key, neighbors));
    }

    if r.remaining() != 0 {
        return Err(StorageError::Corrupt {
            reason: format!("{} trailing byte(s)", r.remaining()),
        });
    }

    Ok(Graph::from_adjacency(entries)?)
}

fn put_i32(buf: &mut Vec<u8>, value: i32) {
    buf.extend_from_slice(&value.to_le_bytes());
}

fn put_str(buf: &mut Vec<u8>, s: &str) {
    put_i32(buf, s.len() as i32);
    buf.extend_from_slice(s.as_bytes());
}

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn bytes(&mut self, n: usize, what: &str) -> Result<&'a [u8], StorageError> {
        if self.remaining() < n {
            return Err(StorageError::Corrupt {
                reason: format!(
                    "truncated {}: need {} byte(s) at offset {}, have {}",
                    what,
                    n,
                    self.pos,
                    self.remaining()
                ),
            });
        }
        let data = self.data;
        let slice = &data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn i32(&mut self, what: &str) -> Result<i32, StorageError> {
        let bytes = self.bytes(4, what)?;
        let mut raw = [0u8; 4];
        raw.copy_from_slice(bytes);
        Ok(i32::from_le_bytes(raw))
    }

    fn len(&mut self, what: &str) -> Result<usize, StorageError> {
        let value = self.i32(what)?;
        usize::try_from(value).map_err(|_| StorageError::Corrupt {
            reason: format!("negative {}: {}", what, value),
        })
    }

    fn string(&mut self, what: &str) -> Result<String, StorageError> {
        let len = self.len(what)?;
        let bytes = self.bytes(len, what)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| StorageError::Corrupt {
            reason: format!("{} is not valid UTF-8", what),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Graph {
        let mut g = Graph::new();
        for k in ["R1", "R2", "SW"] {
            g.insert_vertex(k);
        }
        g.insert_edge("R1", "R2", 10);
        g.insert_edge("SW", "R1", 3);
        g
    }

    fn le(v: i32) -> [u8; 4] {
        v.to_le_bytes()
    }

    #[test]
    fn magic_spells_neto() {
        assert_eq!(&FORMAT_MAGIC.to_le_bytes(), b"NETO");
    }

    #[test]
    fn empty_graph_is_twelve_bytes() {
        let bytes = encode(&Graph::new());
        assert_eq!(bytes.len(), EMPTY_LEN);
        assert_eq!(&bytes[..4], b"NETO");
        assert_eq!(&bytes[4..8], &le(FORMAT_VERSION));
        assert_eq!(&bytes[8..12], &le(0));
    }

    #[test]
    fn layout_is_exact() {
        let mut g = Graph::new();
        g.insert_vertex("A");
        g.insert_vertex("BC");
        g.insert_edge("A", "BC", 7);

        let mut expected = Vec::new();
        expected.extend_from_slice(&le(FORMAT_MAGIC));
        expected.extend_from_slice(&le(FORMAT_VERSION));
        expected.extend_from_slice(&le(2));
        // A: degree 1 -> BC, 7
        expected.extend_from_slice(&le(1));
        expected.extend_from_slice(b"A");
        expected.extend_from_slice(&le(1));
        expected.extend_from_slice(&le(2));
        expected.extend_from_slice(b"BC");
        expected.extend_from_slice(&le(7));
        // BC: degree 1 -> A, 7
        expected.extend_from_slice(&le(2));
        expected.extend_from_slice(b"BC");
        expected.extend_from_slice(&le(1));
        expected.extend_from_slice(&le(1));
        expected.extend_from_slice(b"A");
        expected.extend_from_slice(&le(7));

        assert_eq!(encode(&g), expected);
    }

    #[test]
    fn decode_restores_graph() {
        let g = sample();
        let back = decode(&encode(&g)).unwrap();
        assert_eq!(back, g);
        assert_eq!(back.all_vertices(), g.all_vertices());
        assert_eq!(back.edges_unique(), g.edges_unique());
    }

    #[test]
    fn reencoding_is_byte_identical() {
        let mut g = sample();
        g.insert_vertex("X");
        g.insert_edge("X", "R2", 1);
        g.delete_vertex("R1");
        let bytes = encode(&g);
        assert_eq!(encode(&decode(&bytes).unwrap()), bytes);
    }

    #[test]
    fn wrong_magic_is_invalid_header() {
        let mut bytes = encode(&sample());
        bytes[0] ^= 0xFF;
        assert!(matches!(decode(&bytes), Err(StorageError::InvalidHeader { .. })));
    }

    #[test]
    fn wrong_version_is_invalid_header() {
        let mut bytes = encode(&sample());
        bytes[4..8].copy_from_slice(&le(FORMAT_VERSION + 1));
        match decode(&bytes) {
            Err(StorageError::InvalidHeader { magic, version }) => {
                assert_eq!(magic, FORMAT_MAGIC);
                assert_eq!(version, FORMAT_VERSION + 1);
            }
            other => panic!("expected InvalidHeader, got {other:?}"),
        }
    }

    #[test]
    fn every_truncation_is_rejected() {
        let bytes = encode(&sample());
        for cut in 0..bytes.len() {
            assert!(decode(&bytes[..cut]).is_err(), "prefix of {cut} bytes decoded");
        }
    }

    #[test]
    fn trailing_bytes_are_corrupt() {
        let mut bytes = encode(&sample());
        bytes.push(0);
        assert!(matches!(decode(&bytes), Err(StorageError::Corrupt { .. })));
    }

    #[test]
    fn negative_count_is_corrupt() {
        let mut bytes = encode(&Graph::new());
        bytes[8..12].copy_from_slice(&le(-1));
        assert!(matches!(decode(&bytes), Err(StorageError::Corrupt { .. })));
    }

    #[test]
    fn huge_count_does_not_preallocate() {
        let mut bytes = encode(&Graph::new());
        bytes[8..12].copy_from_slice(&le(i32::MAX));
        assert!(matches!(decode(&bytes), Err(StorageError::Corrupt { .. })));
    }

    #[test]
    fn negative_cost_is_corrupt() {
        let mut g = Graph::new();
        g.insert_vertex("A");
        g.insert_vertex("B");
        g.insert_edge("A", "B", 1);
        let mut bytes = encode(&g);
        // First cost field: header(12) + len(4) + "A"(1) + degree(4) + len(4) + "B"(1).
        let at = 12 + 4 + 1 + 4 + 4 + 1;
        bytes[at..at + 4].copy_from_slice(&le(-5));
        assert!(matches!(decode(&bytes), Err(StorageError::Corrupt { .. })));
    }

    #[test]
    fn non_utf8_key_is_corrupt() {
        let mut g = Graph::new();
        g.insert_vertex("A");
        let mut bytes = encode(&g);
        bytes[16] = 0xFF;
        assert!(matches!(decode(&bytes), Err(StorageError::Corrupt { .. })));
    }

    #[test]
    fn one_sided_link_is_inconsistent() {
        let mut bytes = Vec::new();
        put_i32(&mut bytes, FORMAT_MAGIC);
        put_i32(&mut bytes, FORMAT_VERSION);
        put_i32(&mut bytes, 2);
        put_str(&mut bytes, "A");
        put_i32(&mut bytes, 1);
        put_str(&mut bytes, "B");
        put_i32(&mut bytes, 4);
        put_str(&mut bytes, "B");
        put_i32(&mut bytes, 0);
        assert!(matches!(decode(&bytes), Err(StorageError::Inconsistent(_))));
    }
}
