//! Text topology parser.
//!
//! The format is one directive per line:
//!
//! ```text
//! VERTEX R1
//! VERTEX R2
//! EDGE R1 R2 10
//! ```
//!
//! Lines are trimmed and blank lines skipped. A malformed line produces a
//! [`Diagnostic`] and parsing continues with the next line. The parse as a
//! whole succeeds only if at least one directive was valid.

use std::fmt;
use std::path::Path;

use thiserror::Error;

use crate::edge::{Cost, Edge, MAX_COST};

/// What was wrong with a single topology line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// First token is neither `VERTEX` nor `EDGE`.
    UnknownCommand(String),
    /// `VERTEX` with no key.
    MissingVertexKey,
    /// `EDGE` with fewer than three fields, or a cost that is not an integer.
    IncompleteEdge,
    /// `EDGE` with a negative cost.
    NegativeCost,
    /// `EDGE` with a cost above [`MAX_COST`].
    CostOutOfRange,
}

/// A recoverable error tied to a 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: usize,
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: ", self.line)?;
        match &self.kind {
            DiagnosticKind::UnknownCommand(cmd) => write!(f, "unknown command '{}'", cmd),
            DiagnosticKind::MissingVertexKey => write!(f, "VERTEX without key"),
            DiagnosticKind::IncompleteEdge => {
                write!(f, "incomplete EDGE (expected: EDGE A B COST)")
            }
            DiagnosticKind::NegativeCost => write!(f, "negative cost in EDGE"),
            DiagnosticKind::CostOutOfRange => {
                write!(f, "cost in EDGE exceeds {}", MAX_COST)
            }
        }
    }
}

/// Failure of a whole parse.
#[derive(Debug, Error)]
pub enum TopologyError {
    /// The file could not be read.
    #[error("cannot read topology file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Not a single line produced a vertex or an edge.
    #[error("no valid directives ({} diagnostic(s))", .diagnostics.len())]
    NoValidDirectives { diagnostics: Vec<Diagnostic> },
}

/// The successful result of a parse.
///
/// Edges may reference keys that no `VERTEX` line declared; the graph
/// decides what to do with those.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTopology {
    pub vertices: Vec<String>,
    pub edges: Vec<Edge>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parses topology text.
pub fn parse_str(text: &str) -> Result<ParsedTopology, TopologyError> {
    let mut parsed = ParsedTopology::default();
    let mut valid = 0usize;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let command = tokens.next().unwrap_or_default();

        let outcome = match command {
            "VERTEX" => parse_vertex(tokens).map(|key| parsed.vertices.push(key)),
            "EDGE" => parse_edge(tokens).map(|edge| parsed.edges.push(edge)),
            other => Err(DiagnosticKind::UnknownCommand(other.to_string())),
        };

        match outcome {
            Ok(()) => valid += 1,
            Err(kind) => parsed.diagnostics.push(Diagnostic {
                line: line_no,
                kind,
            }),
        }
    }

    if valid == 0 {
        return Err(TopologyError::NoValidDirectives {
            diagnostics: parsed.diagnostics,
        });
    }

    tracing::debug!(
        vertices = parsed.vertices.len(),
        edges = parsed.edges.len(),
        diagnostics = parsed.diagnostics.len(),
        "parsed topology"
    );
    Ok(parsed)
}

/// Reads and parses a topology file.
pub fn parse_file(path: impl AsRef<Path>) -> Result<ParsedTopology, TopologyError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| TopologyError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_str(&text)
}

fn parse_vertex<'a>(mut tokens: impl Iterator<Item = &'a str>) -> Result<String, DiagnosticKind> {
    tokens
        .next()
        .map(str::to_string)
        .ok_or(DiagnosticKind::MissingVertexKey)
}

fn parse_edge<'a>(mut tokens: impl Iterator<Item = &'a str>) -> Result<Edge, DiagnosticKind> {
    let (Some(a), Some(b), Some(raw_cost)) = (tokens.next(), tokens.next(), tokens.next()) else {
        return Err(DiagnosticKind::IncompleteEdge);
    };
    let cost: i64 = raw_cost
        .parse()
        .map_err(|_| DiagnosticKind::IncompleteEdge)?;
    if cost < 0 {
        return Err(DiagnosticKind::NegativeCost);
    }
    let cost = Cost::try_from(cost)
        .ok()
        .filter(|c| *c <= MAX_COST)
        .ok_or(DiagnosticKind::CostOutOfRange)?;
    Ok(Edge::new(a, b, cost))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_vertices_and_edges() {
        let text = "VERTEX R1\nVERTEX R2\nEDGE R1 R2 10\n";
        let parsed = parse_str(text).unwrap();
        assert_eq!(parsed.vertices, vec!["R1", "R2"]);
        assert_eq!(parsed.edges, vec![Edge::new("R1", "R2", 10)]);
        assert!(parsed.diagnostics.is_empty());
    }

    #[test]
    fn malformed_edge_is_recorded_and_parsing_continues() {
        let text = "EDGE A B\nVERTEX A\n";
        let parsed = parse_str(text).unwrap();
        assert_eq!(parsed.vertices, vec!["A"]);
        assert!(parsed.edges.is_empty());
        assert_eq!(
            parsed.diagnostics,
            vec![Diagnostic {
                line: 1,
                kind: DiagnosticKind::IncompleteEdge
            }]
        );
    }

    #[test]
    fn blank_lines_and_surrounding_whitespace_are_ignored() {
        let text = "\n   \n\t VERTEX  core  \n\nEDGE core core 0   \n";
        let parsed = parse_str(text).unwrap();
        assert_eq!(parsed.vertices, vec!["core"]);
        assert_eq!(parsed.edges, vec![Edge::new("core", "core", 0)]);
    }

    #[test]
    fn line_numbers_count_blank_lines() {
        let text = "VERTEX A\n\n\nBOGUS x\n";
        let parsed = parse_str(text).unwrap();
        assert_eq!(
            parsed.diagnostics,
            vec![Diagnostic {
                line: 4,
                kind: DiagnosticKind::UnknownCommand("BOGUS".into())
            }]
        );
    }

    #[test]
    fn each_error_kind_is_detected() {
        let text = "VERTEX\nEDGE A B -3\nEDGE A B x\nEDGE A B 4294967296\nEDGE A B 2147483648\nLINK A B\nVERTEX ok\n";
        let parsed = parse_str(text).unwrap();
        let kinds: Vec<DiagnosticKind> =
            parsed.diagnostics.iter().map(|d| d.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                DiagnosticKind::MissingVertexKey,
                DiagnosticKind::NegativeCost,
                DiagnosticKind::IncompleteEdge,
                DiagnosticKind::CostOutOfRange,
                DiagnosticKind::CostOutOfRange,
                DiagnosticKind::UnknownCommand("LINK".into()),
            ]
        );
        assert_eq!(parsed.vertices, vec!["ok"]);
    }

    #[test]
    fn max_cost_is_accepted() {
        let parsed = parse_str("EDGE A B 2147483647").unwrap();
        assert_eq!(parsed.edges[0].cost(), MAX_COST);
    }

    #[test]
    fn trailing_tokens_are_ignored() {
        let parsed = parse_str("EDGE A B 3 extra\nVERTEX A B").unwrap();
        assert_eq!(parsed.edges, vec![Edge::new("A", "B", 3)]);
        assert_eq!(parsed.vertices, vec!["A"]);
    }

    #[test]
    fn commands_are_case_sensitive() {
        let err = parse_str("vertex A\nedge A B 1").unwrap_err();
        match err {
            TopologyError::NoValidDirectives { diagnostics } => assert_eq!(diagnostics.len(), 2),
            other => panic!("expected NoValidDirectives, got {other:?}"),
        }
    }

    #[test]
    fn empty_input_fails() {
        let err = parse_str("").unwrap_err();
        match err {
            TopologyError::NoValidDirectives { diagnostics } => assert!(diagnostics.is_empty()),
            other => panic!("expected NoValidDirectives, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = parse_file(dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, TopologyError::Io { .. }));
    }

    #[test]
    fn diagnostic_display_names_line() {
        let d = Diagnostic {
            line: 7,
            kind: DiagnosticKind::NegativeCost,
        };
        assert_eq!(d.to_string(), "line 7: negative cost in EDGE");
    }
}
