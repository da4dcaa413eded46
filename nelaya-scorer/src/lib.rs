//! Scoring of ocean conditions for the Nelaya engine.
//!
//! The crate provides two complementary capabilities:
//! - **Request-time scoring** through [`ModelScorer`], which loads a
//!   standard scaler and a one-hidden-layer ReLU network from a JSON
//!   artefact and implements the
//!   [`ScoringService`](nelaya_core::ScoringService) trait.
//! - **Daily snapshot building** through [`build_snapshot`], which scores
//!   decoded grid cells and produces the GeoJSON collection the
//!   recommendation engine reads.
//!
//! Neither path retrains the model or spawns background work.
//!
//! # Examples
//!
//! ```no_run
//! use camino::Utf8Path;
//! use nelaya_core::{Conditions, score_conditions};
//! use nelaya_scorer::ModelScorer;
//!
//! let scorer = ModelScorer::load(Utf8Path::new("models/fgi_model.json"));
//! let score = score_conditions(&scorer, &Conditions::new(29.1, 33.4, 0.21));
//! println!("{:?} {:?}", score.probability, score.band);
//! ```

#![forbid(unsafe_code)]

mod error;
mod grid;
mod model;
mod scorer;

pub use error::{BuildError, ModelError};
pub use grid::{
    GridCell, PointGeometry, SNAPSHOT_MODE, SnapshotCollection, SnapshotFeature, SnapshotMeta,
    SnapshotProperties, build_snapshot, build_snapshot_at, round_score,
};
pub use model::{ConditionsModel, DenseLayer, FEATURE_COUNT, OutputLayer, StandardScaler};
pub use scorer::ModelScorer;
