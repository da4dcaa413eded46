//! Errors surfaced by the recommendation engine and their user-facing form.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{CatalogError, InvalidDate, RequestValidationError, ScoringError, SnapshotError};

/// Machine-readable category of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A date string was not `YYYY-MM-DD`.
    InvalidDate,
    /// The request failed validation.
    InvalidRequest,
    /// No snapshot exists within the look-back window.
    SnapshotNotFound,
    /// A snapshot exists but could not be parsed.
    CatalogUnreadable,
    /// The scoring collaborator could not produce a score.
    ModelUnavailable,
}

impl ErrorKind {
    /// Return the kind as a `snake_case` `&str`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidDate => "invalid_date",
            Self::InvalidRequest => "invalid_request",
            Self::SnapshotNotFound => "snapshot_not_found",
            Self::CatalogUnreadable => "catalog_unreadable",
            Self::ModelUnavailable => "model_unavailable",
        }
    }

    /// HTTP status a request boundary should report for this kind.
    pub const fn http_status(self) -> u16 {
        match self {
            Self::InvalidDate | Self::InvalidRequest => 422,
            Self::SnapshotNotFound => 404,
            Self::CatalogUnreadable => 500,
            Self::ModelUnavailable => 503,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serialisable error payload returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Failure category.
    pub kind: ErrorKind,
    /// Human-readable explanation.
    pub message: String,
}

/// Errors returned by [`crate::Recommender::recommend`].
///
/// An empty candidate set is not an error; it yields a result with
/// `ok == false`.
#[derive(Debug, Error)]
pub enum RecommendError {
    /// The request date could not be parsed.
    #[error(transparent)]
    InvalidDate(#[from] InvalidDate),
    /// The request failed validation.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] RequestValidationError),
    /// No snapshot could be resolved.
    #[error(transparent)]
    SnapshotNotFound(#[from] SnapshotError),
    /// The resolved snapshot could not be read or parsed.
    #[error("{0}")]
    CatalogUnreadable(#[from] CatalogError),
}

impl RecommendError {
    /// Category of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidDate(_) => ErrorKind::InvalidDate,
            Self::InvalidRequest(_) => ErrorKind::InvalidRequest,
            Self::SnapshotNotFound(_) => ErrorKind::SnapshotNotFound,
            Self::CatalogUnreadable(_) => ErrorKind::CatalogUnreadable,
        }
    }

    /// User-facing payload for this error.
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            kind: self.kind(),
            message: self.to_string(),
        }
    }
}

impl ScoringError {
    /// Category of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidConditions { .. } => ErrorKind::InvalidRequest,
            Self::Unavailable | Self::NonFiniteOutput => ErrorKind::ModelUnavailable,
        }
    }

    /// User-facing payload for this error.
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            kind: self.kind(),
            message: self.to_string(),
        }
    }
}
