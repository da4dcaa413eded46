//! Error types raised while loading models and building snapshots.
#![forbid(unsafe_code)]

use camino::Utf8PathBuf;
use nelaya_core::ScoringStatus;
use thiserror::Error;

/// Errors raised while loading or validating a [`ConditionsModel`](crate::ConditionsModel).
#[derive(Debug, Error)]
pub enum ModelError {
    /// Reading the model artefact failed.
    #[error("failed to read model from {path}")]
    Read {
        /// Location of the artefact.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// The artefact was not a valid model document.
    #[error("failed to parse model from {path}")]
    Parse {
        /// Location of the artefact.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// A vector had the wrong length.
    #[error("{component} has {found} entries, expected {expected}")]
    Shape {
        /// Model component with the bad shape.
        component: &'static str,
        /// Required length.
        expected: usize,
        /// Length found in the artefact.
        found: usize,
    },
    /// The hidden layer had no units.
    #[error("hidden layer must contain at least one unit")]
    EmptyHiddenLayer,
    /// A parameter was NaN or infinite.
    #[error("{component} contains a non-finite parameter")]
    NonFinite {
        /// Model component with the bad value.
        component: &'static str,
    },
}

/// Errors raised by [`build_snapshot`](crate::build_snapshot).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    /// The scoring service could not score.
    #[error("scoring model is not ready (status: {})", status.as_str())]
    ModelUnavailable {
        /// Status reported by the service.
        status: ScoringStatus,
    },
}
