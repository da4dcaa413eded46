//! Facade crate for the Nelaya fishing-ground engine.
//!
//! This crate re-exports the core domain types and exposes the filesystem
//! snapshot store and the model-backed scorer behind feature flags.

#![forbid(unsafe_code)]

pub use nelaya_core::{
    Band, Boat, CatalogError, ConditionScore, Conditions, Constraints, ErrorBody, ErrorKind, Mode,
    Origin, RecommendError, RecommendRequest, RecommendationResult, Recommender,
    RecommenderConfig, ScoringError, ScoringService, ScoringStatus, SnapshotError,
    SnapshotReference, SnapshotStore, Spot, distance_km, score_conditions, to_band, to_prob,
};

#[cfg(feature = "store-fs")]
pub use nelaya_data::{DEFAULT_SNAPSHOT_DIR, FsSnapshotStore, SnapshotWriteError, write_snapshot};

#[cfg(feature = "scorer")]
pub use nelaya_scorer::{
    BuildError, ConditionsModel, GridCell, ModelError, ModelScorer, SnapshotCollection,
    build_snapshot,
};
