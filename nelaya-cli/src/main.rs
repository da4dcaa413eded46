//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use std::process::ExitCode;

use nelaya_cli::CliError;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    init_logging();
    match nelaya_cli::run() {
        Ok(outcome) => outcome.exit_code(),
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("nelaya: {:?}", eyre::Report::new(err));
            ExitCode::FAILURE
        }
    }
}

/// Send `log` records to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_err()
    {
        eprintln!("nelaya: logging already initialised");
    }
}
