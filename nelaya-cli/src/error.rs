//! Error types emitted by the Nelaya CLI.
//!
//! Engine rejections are not errors here: they are printed as an
//! `ErrorBody` and reported through `Outcome::Rejected`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use nelaya_core::InvalidDate;
use nelaya_data::SnapshotWriteError;
use nelaya_scorer::{BuildError, ModelError};
use thiserror::Error;

/// Errors emitted by the Nelaya CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Option name.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A required positional argument is missing after configuration merging.
    #[error("missing <{field}> argument (pass it after the subcommand or set {env})")]
    MissingPositional {
        /// Argument name.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk or is not a file.
    #[error("{field} path {path:?} does not exist or is not a file")]
    MissingSourceFile {
        /// Option naming the input.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Option naming the input.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// Reading an input file failed.
    #[error("failed to read {field} at {path:?}: {source}")]
    ReadInput {
        /// Option naming the input.
        field: &'static str,
        /// Input path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// An input file is not the expected JSON document.
    #[error("failed to parse {field} JSON at {path:?}: {source}")]
    ParseInput {
        /// Option naming the input.
        field: &'static str,
        /// Input path.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// `--date` is not a `YYYY-MM-DD` date.
    #[error("invalid --date: {0}")]
    InvalidDate(#[from] InvalidDate),
    /// The conditions model could not be loaded.
    #[error("failed to load conditions model from {path:?}: {source}")]
    LoadModel {
        /// Model artefact path.
        path: Utf8PathBuf,
        /// Source error from the scorer.
        #[source]
        source: ModelError,
    },
    /// The snapshot could not be built.
    #[error("failed to build snapshot: {0}")]
    BuildSnapshot(#[from] BuildError),
    /// The built snapshot could not be stored.
    #[error(transparent)]
    WriteSnapshot(#[from] SnapshotWriteError),
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
