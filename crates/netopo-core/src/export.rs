//! Plain-text listings for downstream tooling.
//!
//! Vertices are written one key per line; edges as `u v cost`. The
//! `write_*` functions target any writer, the `export_*` functions create
//! (or truncate) a file and close it before returning.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::edge::Edge;
use crate::error::CoreError;
use crate::graph::Graph;

/// Default file name for the vertex listing.
pub const VERTICES_FILE: &str = "graph_vertices.txt";
/// Default file name for the unique edge listing.
pub const EDGES_FILE: &str = "graph_edges.txt";
/// Default file name for the MST edge listing.
pub const MST_FILE: &str = "mst_edges.txt";

/// Writes every vertex key, one per line.
pub fn write_vertices<W: Write>(graph: &Graph, out: &mut W) -> io::Result<()> {
    for key in graph.all_vertices() {
        writeln!(out, "{}", key)?;
    }
    Ok(())
}

/// Writes `edges` as `u v cost` lines.
pub fn write_edges<W: Write>(edges: &[Edge], out: &mut W) -> io::Result<()> {
    for edge in edges {
        writeln!(out, "{}", edge)?;
    }
    Ok(())
}

/// Writes the vertex listing to `path`.
pub fn export_vertices(graph: &Graph, path: impl AsRef<Path>) -> Result<(), CoreError> {
    write_file(path.as_ref(), |out| write_vertices(graph, out))
}

/// Writes the unique edge listing of `graph` to `path`.
pub fn export_edges(graph: &Graph, path: impl AsRef<Path>) -> Result<(), CoreError> {
    write_file(path.as_ref(), |out| write_edges(&graph.edges_unique(), out))
}

/// Writes the MST edges to `path`.
pub fn export_mst(mst: &[Edge], path: impl AsRef<Path>) -> Result<(), CoreError> {
    write_file(path.as_ref(), |out| write_edges(mst, out))
}

fn write_file<F>(path: &Path, body: F) -> Result<(), CoreError>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let mut out = BufWriter::new(File::create(path)?);
    body(&mut out)?;
    out.flush()?;
    tracing::debug!(path = %path.display(), "exported listing");
    Ok(())
}
