//! Topology commands shared by one-shot invocations and the shell.

use std::io::Write;
use std::path::PathBuf;

use clap::Subcommand;

use netopo_core::export::{self, EDGES_FILE, MST_FILE, VERTICES_FILE};
use netopo_core::{Cost, MAX_COST};
use netopo_mst::KruskalMst;
use netopo_storage::{TopologySession, TopologyStore};

use crate::config::Config;
use crate::error::CliError;

/// Commands that act on the loaded topology.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Remove every vertex and edge, and persist the empty topology at once.
    Clear,

    /// Add the VERTEX and EDGE directives of a text file.
    Import {
        /// Topology text file.
        file: PathBuf,
    },

    /// Print whether a vertex exists.
    HasVertex { key: String },

    /// Print whether an edge exists, and its cost.
    HasEdge { a: String, b: String },

    /// Add a vertex.
    AddVertex { key: String },

    /// Add an undirected edge between two existing vertices.
    AddEdge {
        a: String,
        b: String,
        #[arg(value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_COST)))]
        cost: Cost,
    },

    /// Remove a vertex and every edge touching it.
    RemoveVertex { key: String },

    /// Remove an undirected edge.
    RemoveEdge { a: String, b: String },

    /// Print every vertex, then every unique edge.
    List,

    /// Print vertex, edge and component counts.
    Stats,

    /// Compute the minimum spanning tree (a forest if disconnected).
    Mst {
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,

        /// Also write the tree edges to the MST listing.
        #[arg(long)]
        export: bool,
    },

    /// Write the vertex, edge and MST listings to the export directory.
    Export,
}

/// Runs `command` against the session's graph, writing its report to `out`.
///
/// Per-line import diagnostics are warnings, not part of the report, and go
/// to stderr.
///
/// Mutations that the graph declines (a duplicate, an unknown endpoint, a
/// missing vertex) are reported as unchanged rather than as errors.
pub fn execute<S, W>(
    session: &mut TopologySession<S>,
    command: &Command,
    config: &Config,
    out: &mut W,
) -> Result<(), CliError>
where
    S: TopologyStore,
    W: Write,
{
    match command {
        Command::Clear => {
            session.clear_and_persist()?;
            writeln!(out, "cleared")?;
        }
        Command::Import { file } => {
            let report = session.graph_mut().import_from_txt(file)?;
            for diagnostic in &report.diagnostics {
                eprintln!("warning: {}: {}", file.display(), diagnostic);
            }
            writeln!(
                out,
                "imported {} vertices, {} edges ({} skipped, {} diagnostics)",
                report.vertices_added,
                report.edges_added,
                report.edges_skipped,
                report.diagnostics.len()
            )?;
        }
        Command::HasVertex { key } => {
            writeln!(out, "{}", session.graph().has_vertex(key))?;
        }
        Command::HasEdge { a, b } => match session.graph().has_edge(a, b) {
            Some(cost) => writeln!(out, "true {}", cost)?,
            None => writeln!(out, "false")?,
        },
        Command::AddVertex { key } => {
            if session.graph_mut().insert_vertex(key) {
                writeln!(out, "added vertex {}", key)?;
            } else {
                writeln!(out, "vertex {} unchanged", key)?;
            }
        }
        Command::AddEdge { a, b, cost } => {
            if session.graph_mut().insert_edge(a, b, *cost) {
                writeln!(out, "added edge {} {} {}", a, b, cost)?;
            } else {
                writeln!(out, "edge {} {} unchanged", a, b)?;
            }
        }
        Command::RemoveVertex { key } => {
            if session.graph_mut().delete_vertex(key) {
                writeln!(out, "removed vertex {}", key)?;
            } else {
                writeln!(out, "vertex {} unchanged", key)?;
            }
        }
        Command::RemoveEdge { a, b } => {
            if session.graph_mut().delete_undirected_edge(a, b) {
                writeln!(out, "removed edge {} {}", a, b)?;
            } else {
                writeln!(out, "edge {} {} unchanged", a, b)?;
            }
        }
        Command::List => {
            let graph = session.graph();
            writeln!(out, "vertices ({}):", graph.vertex_count())?;
            export::write_vertices(graph, out)?;
            writeln!(out, "edges ({}):", graph.edge_count())?;
            export::write_edges(&graph.edges_unique(), out)?;
        }
        Command::Stats => {
            let graph = session.graph();
            writeln!(out, "vertices: {}", graph.vertex_count())?;
            writeln!(out, "edges: {}", graph.edge_count())?;
            writeln!(out, "components: {}", graph.connected_components())?;
        }
        Command::Mst { json, export: write_listing } => {
            let mst = KruskalMst::new().compute(session.graph());
            if *json {
                writeln!(out, "{}", serde_json::to_string_pretty(&mst)?)?;
            } else {
                export::write_edges(&mst.edges, out)?;
                writeln!(out, "total cost: {}", mst.total_cost)?;
                if !mst.is_spanning_tree() && mst.vertex_count > 0 {
                    writeln!(out, "trees: {}", mst.tree_count())?;
                }
            }
            if *write_listing {
                export::export_mst(&mst.edges, config.export_path(MST_FILE))?;
            }
        }
        Command::Export => {
            let graph = session.graph();
            export::export_vertices(graph, config.export_path(VERTICES_FILE))?;
            export::export_edges(graph, config.export_path(EDGES_FILE))?;
            let mst = KruskalMst::new().compute(graph);
            export::export_mst(&mst.edges, config.export_path(MST_FILE))?;
            writeln!(out, "exported to {}", config.export_dir.display())?;
        }
    }
    Ok(())
}
