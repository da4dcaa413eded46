//! Command-line interface for the Nelaya fishing-ground engine.
#![forbid(unsafe_code)]

use std::io::Write;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;

mod build;
mod error;
mod input;
mod recommend;
mod score;

pub use error::CliError;

use build::{BuildSnapshotArgs, run_build_snapshot};
use recommend::{RecommendArgs, run_recommend};
use score::{ScoreArgs, run_score};

pub(crate) const ARG_REQUEST: &str = "request";
pub(crate) const ARG_SNAPSHOT_DIR: &str = "snapshot-dir";
pub(crate) const ARG_MAX_BACK_DAYS: &str = "max-back-days";
pub(crate) const ARG_MODEL: &str = "model";
pub(crate) const ARG_TEMP: &str = "temp";
pub(crate) const ARG_SAL: &str = "sal";
pub(crate) const ARG_CHL: &str = "chl";
pub(crate) const ARG_CELLS: &str = "cells";
pub(crate) const ARG_DATE: &str = "date";

pub(crate) const ENV_RECOMMEND_REQUEST: &str = "NELAYA_CMDS_RECOMMEND_REQUEST_PATH";
pub(crate) const ENV_SCORE_TEMP: &str = "NELAYA_CMDS_SCORE_TEMP";
pub(crate) const ENV_SCORE_SAL: &str = "NELAYA_CMDS_SCORE_SAL";
pub(crate) const ENV_SCORE_CHL: &str = "NELAYA_CMDS_SCORE_CHL";
pub(crate) const ENV_BUILD_CELLS: &str = "NELAYA_CMDS_BUILD_SNAPSHOT_CELLS";
pub(crate) const ENV_BUILD_DATE: &str = "NELAYA_CMDS_BUILD_SNAPSHOT_DATE";

/// Model artefact used when `--model` is not configured.
pub const DEFAULT_MODEL_PATH: &str = "models/fgi_model.json";

/// How a command finished when it did not fail outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command produced its normal output.
    Completed,
    /// The engine refused the input and an error body was printed.
    Rejected,
}

impl Outcome {
    /// Process exit code for this outcome.
    #[must_use]
    pub fn exit_code(self) -> ExitCode {
        match self {
            Self::Completed => ExitCode::SUCCESS,
            Self::Rejected => ExitCode::from(2),
        }
    }
}

/// Run the Nelaya CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments, configuration, inputs or output
/// fail. Engine rejections are reported through [`Outcome::Rejected`].
pub fn run() -> Result<Outcome, CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Recommend(args) => run_recommend(args),
        Command::Score(args) => run_score(args),
        Command::BuildSnapshot(args) => run_build_snapshot(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "nelaya",
    about = "Fishing-ground recommendations from daily FGI snapshots",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Recommend fishing grounds for a JSON request.
    Recommend(RecommendArgs),
    /// Score one set of ocean readings.
    Score(ScoreArgs),
    /// Build and store the daily snapshot from decoded grid cells.
    BuildSnapshot(BuildSnapshotArgs),
}

pub(crate) fn write_json<T>(writer: &mut dyn Write, value: &T) -> Result<(), CliError>
where
    T: Serialize + ?Sized,
{
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
