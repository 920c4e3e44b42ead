//! Line-oriented command loop over one session.
//!
//! Each input line is one command with the same syntax as the one-shot
//! subcommands, e.g. `add-edge R1 R2 10`. `exit` or `quit` ends the loop,
//! as does end of input. A bad line is reported and the loop goes on.

use std::io::{BufRead, Write};

use clap::Parser;

use netopo_storage::{TopologySession, TopologyStore};

use crate::config::Config;
use crate::error::CliError;
use crate::ops::{self, Command};

#[derive(Debug, Parser)]
#[command(name = "netopo", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: Command,
}

/// Runs commands from `input` until `exit`, `quit` or end of input.
///
/// Returns the number of lines that failed. An I/O failure while writing
/// to `out` or reading `input` aborts the loop.
pub fn run<S, R, W>(
    session: &mut TopologySession<S>,
    config: &Config,
    input: R,
    out: &mut W,
) -> Result<usize, CliError>
where
    S: TopologyStore,
    R: BufRead,
    W: Write,
{
    let mut failures = 0;
    for line in input.lines() {
        let line = line?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.first() {
            None => continue,
            Some(&"exit") | Some(&"quit") => break,
            Some(_) => {}
        }

        let parsed = match ShellLine::try_parse_from(tokens.iter().copied()) {
            Ok(parsed) => parsed,
            Err(err) => {
                // --help output is not a failure.
                if err.use_stderr() {
                    failures += 1;
                }
                write!(out, "{}", err)?;
                continue;
            }
        };

        match ops::execute(session, &parsed.command, config, out) {
            Ok(()) => {}
            Err(CliError::Output(err)) => return Err(CliError::Output(err)),
            Err(err) => {
                failures += 1;
                tracing::debug!(line = %line, error = %err, "command failed");
                writeln!(out, "error: {}", err)?;
            }
        }
        out.flush()?;
    }
    Ok(failures)
}
