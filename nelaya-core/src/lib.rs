//! Core domain types and decision logic for the Nelaya engine.
//!
//! The crate turns a daily snapshot of scored ocean points into ranked
//! fishing-ground recommendations for one vessel and one origin. Storage
//! and scoring sit behind the [`SnapshotStore`] and [`ScoringService`]
//! traits so callers can plug in filesystem stores and trained models.

mod band;
mod candidate;
mod catalog;
mod dedup;
mod geo_math;
mod normaliser;
mod rank;
mod recommend;
mod request;
mod scoring;
pub mod snapshot;
mod spot;
pub mod test_support;
mod trip;

pub use band::Band;
pub use candidate::filter_candidates;
pub use catalog::{
    CatalogError, FeatureOutcome, SkipReason, SpotCatalog, load_catalog, parse_catalog,
    parse_feature,
};
pub use dedup::deduplicate;
pub use geo_math::{EARTH_MEAN_RADIUS_KM, distance_km};
pub use normaliser::{HIGH_THRESHOLD, MEDIUM_THRESHOLD, sigmoid, to_band, to_prob};
pub use rank::{compare_by_cost, compare_by_quality, rank_by_cost, rank_by_quality};
pub use recommend::{
    ErrorBody, ErrorKind, NO_CANDIDATES_MESSAGE, OK_MESSAGE, RecommendError,
    RecommendationResult, Recommender, RecommenderConfig, assemble,
};
pub use request::{DATE_FORMAT, InvalidDate, RecommendRequest, RequestValidationError, parse_date};
pub use scoring::{
    ConditionScore, Conditions, ScoringError, ScoringService, ScoringStatus, score_conditions,
    try_score_conditions,
};
pub use snapshot::{SnapshotError, SnapshotReference, SnapshotStore, resolve_snapshot};
pub use spot::Spot;
pub use trip::{
    Boat, Constraints, DEFAULT_FGI_MIN, DEFAULT_MAX_RADIUS_KM, DEFAULT_TOP_N, MAX_TOP_N, Mode,
    Origin, TripEconomics,
};
