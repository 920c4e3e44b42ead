//! Network topology tool.
//!
//! Provides the `netopo` binary. Every invocation loads the persisted
//! topology (starting empty if there is none), runs one command or an
//! interactive shell against it, and saves it back before exiting.
//!
//! Exit codes: 0 = success, 1 = rejected command or invalid input,
//! 3 = I/O error.
//!
//! Logs go to stderr; set `RUST_LOG` (e.g. `RUST_LOG=netopo_mst=trace`) to
//! see more than warnings.

mod config;
mod error;
mod ops;
mod shell;

use std::io::{self, Write};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use netopo_storage::{FileStore, TopologySession};

use crate::config::Config;
use crate::error::{CliError, EXIT_FAILURE};
use crate::ops::Command;

/// Network topology store and minimum spanning tree tool.
#[derive(Parser)]
#[command(name = "netopo", about = "Network topology store and MST tool")]
struct Cli {
    #[command(flatten)]
    config: Config,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Op(Command),

    /// Read commands from stdin, one per line, until `exit` or `quit`.
    Shell,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help prints to stdout and succeeds.
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            let err = CliError::from(err);
            eprint!("{}", err);
            process::exit(err.exit_code());
        }
    };
    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

/// Opens the session, runs the command, and closes the session.
///
/// The session is closed even when the command fails, so changes made
/// before the failure are kept. A command error takes precedence over a
/// save error.
fn run(cli: Cli) -> Result<i32, CliError> {
    let config = cli.config;
    let mut session = TopologySession::open(FileStore::new(config.graph_path()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let outcome = match &cli.command {
        Commands::Op(command) => ops::execute(&mut session, command, &config, &mut out).map(|()| 0),
        Commands::Shell => {
            let stdin = io::stdin();
            shell::run(&mut session, &config, stdin.lock(), &mut out).map(|failures| {
                if failures > 0 {
                    tracing::warn!(failures, "shell finished with failed commands");
                    EXIT_FAILURE
                } else {
                    0
                }
            })
        }
    };
    out.flush()?;

    let closed = session.close();
    let code = outcome?;
    closed?;
    Ok(code)
}
