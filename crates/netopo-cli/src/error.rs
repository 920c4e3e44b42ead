//! Failures surfaced by the `netopo` binary and their exit codes.

use netopo_core::{CoreError, TopologyError};
use netopo_storage::StorageError;
use thiserror::Error;

/// Exit code for a rejected command or invalid input.
pub const EXIT_FAILURE: i32 = 1;
/// Exit code for a filesystem failure.
pub const EXIT_IO: i32 = 3;

#[derive(Debug, Error)]
pub enum CliError {
    /// Command-line arguments that clap rejected. The message is clap's
    /// rendered usage error.
    #[error("{0}")]
    Usage(String),

    #[error("import failed: {0}")]
    Import(#[from] TopologyError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("export failed: {0}")]
    Export(#[from] CoreError),

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl From<clap::Error> for CliError {
    fn from(err: clap::Error) -> Self {
        CliError::Usage(err.render().to_string())
    }
}

impl CliError {
    /// 1 for bad input, 3 for anything the filesystem refused.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) | CliError::Json(_) => EXIT_FAILURE,
            CliError::Import(TopologyError::NoValidDirectives { .. }) => EXIT_FAILURE,
            CliError::Import(TopologyError::Io { .. }) => EXIT_IO,
            CliError::Storage(_) | CliError::Output(_) => EXIT_IO,
            CliError::Export(CoreError::Io(_)) => EXIT_IO,
            CliError::Export(CoreError::GraphInconsistency { .. }) => EXIT_FAILURE,
        }
    }
}
