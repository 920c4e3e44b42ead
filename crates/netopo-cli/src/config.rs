//! Where the binary keeps its state and writes its listings.
//!
//! Each setting is a global flag with an environment fallback, so it can be
//! given before or after the subcommand.

use std::path::{Path, PathBuf};

use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct Config {
    /// Persisted topology file.
    #[arg(long = "graph", env = "NETOPO_GRAPH", default_value = "graph.bin", global = true)]
    pub graph_path: PathBuf,

    /// Directory for exported listings.
    #[arg(long, env = "NETOPO_EXPORT_DIR", default_value = ".", global = true)]
    pub export_dir: PathBuf,
}

impl Config {
    /// Path of the listing `file_name` inside the export directory.
    pub fn export_path(&self, file_name: &str) -> PathBuf {
        self.export_dir.join(file_name)
    }

    pub fn graph_path(&self) -> &Path {
        &self.graph_path
    }
}
