//! Compose ranked fishing-ground recommendations for one request.
//!
//! [`Recommender`] drives the pipeline: resolve the snapshot, load its
//! catalog, filter and cost the candidates, rank them twice, thin each
//! ranking spatially, then assemble the response. The pipeline is
//! synchronous and keeps no state between requests.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::snapshot::{DEFAULT_MAX_BACK_DAYS, SnapshotStore, resolve_snapshot};
use crate::{
    Constraints, Mode, Origin, RecommendRequest, Spot, deduplicate, filter_candidates,
    load_catalog, rank_by_cost, rank_by_quality,
};

mod error;

pub use error::{ErrorBody, ErrorKind, RecommendError};

/// Message reported with a successful recommendation.
pub const OK_MESSAGE: &str = "ok";

/// Message reported when filtering leaves no candidates.
pub const NO_CANDIDATES_MESSAGE: &str = "No candidate spots found (check radius/fgi_min/budget)";

/// Engine settings shared by every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    /// How many days before the requested date to search for a snapshot.
    pub max_back_days: u16,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            max_back_days: DEFAULT_MAX_BACK_DAYS,
        }
    }
}

/// Response for one recommendation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    /// `false` when no spot survived filtering.
    pub ok: bool,
    /// [`OK_MESSAGE`] or a diagnostic.
    pub message: String,
    /// Day of the snapshot that was used.
    pub date: NaiveDate,
    /// When the result was produced.
    pub generated_at: DateTime<Utc>,
    /// Mode the request asked for.
    pub mode: Mode,
    /// Constraints the request was evaluated under.
    pub constraints: Constraints,
    /// Echo of the request origin.
    pub chosen_origin: Origin,
    /// Primary recommendation for the requested mode.
    pub chosen_best: Option<Spot>,
    /// Cheapest well-separated spot.
    pub chosen_cheapest: Option<Spot>,
    /// Highest-scoring spot, before spatial thinning.
    pub chosen_best_by_score: Option<Spot>,
    /// Well-separated spots ordered by quality, at most `top_n`.
    pub ranks: Vec<Spot>,
    /// Well-separated spots ordered by cost, at most `top_n`.
    pub cheapest_ranks: Vec<Spot>,
}

/// Build the response from an already filtered and costed candidate set.
///
/// # Examples
/// ```
/// use chrono::{NaiveDate, Utc};
/// use nelaya_core::{Boat, Constraints, Mode, Origin, RecommendRequest, assemble};
///
/// let request = RecommendRequest {
///     date: None,
///     date_utc: None,
///     mode: Mode::Optimal,
///     origin: Origin::new(5.5, 95.2),
///     boat: Boat { speed_kmh: 20.0, burn_lph: 10.0, fuel_price: 10_000.0 },
///     constraints: Constraints::default(),
/// };
/// let date = NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date");
///
/// let result = assemble(&request, date, Utc::now(), Vec::new());
/// assert!(!result.ok);
/// assert!(result.ranks.is_empty());
/// ```
pub fn assemble(
    request: &RecommendRequest,
    date: NaiveDate,
    generated_at: DateTime<Utc>,
    candidates: Vec<Spot>,
) -> RecommendationResult {
    let constraints = request.constraints;
    let mut result = RecommendationResult {
        ok: false,
        message: NO_CANDIDATES_MESSAGE.to_owned(),
        date,
        generated_at,
        mode: request.mode,
        constraints,
        chosen_origin: request.origin.clone(),
        chosen_best: None,
        chosen_cheapest: None,
        chosen_best_by_score: None,
        ranks: Vec::new(),
        cheapest_ranks: Vec::new(),
    };
    if candidates.is_empty() {
        return result;
    }

    let by_quality = rank_by_quality(&candidates);
    let by_cost = rank_by_cost(&candidates);
    let limit = constraints.limit();
    let ranks = deduplicate(&by_quality, constraints.min_separation_km, limit);
    let cheapest_ranks = deduplicate(&by_cost, constraints.min_separation_km, limit);

    let chosen_best_by_score = by_quality.first().cloned();
    let chosen_cheapest = cheapest_ranks.first().or(by_cost.first()).cloned();
    let chosen_best = match request.mode {
        Mode::Budget => chosen_cheapest.clone(),
        Mode::Optimal => chosen_best_by_score.clone(),
    };
    log::debug!(
        "assembled {} ranked and {} cheapest spots from {} candidates",
        ranks.len(),
        cheapest_ranks.len(),
        candidates.len()
    );

    result.ok = true;
    result.message = OK_MESSAGE.to_owned();
    result.chosen_best = chosen_best;
    result.chosen_cheapest = chosen_cheapest;
    result.chosen_best_by_score = chosen_best_by_score;
    result.ranks = ranks;
    result.cheapest_ranks = cheapest_ranks;
    result
}

/// Recommendation engine over a snapshot store.
///
/// # Examples
/// ```
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use nelaya_core::test_support::MemorySnapshotStore;
/// use nelaya_core::{Boat, Constraints, Mode, Origin, RecommendRequest, Recommender};
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date");
/// let store = MemorySnapshotStore::new().with_snapshot(
///     date,
///     r#"{"features": [{"geometry": {"type": "Point", "coordinates": [95.2, 5.6]},
///                       "properties": {"score": 0.8}}]}"#,
/// );
/// let request = RecommendRequest {
///     date: Some("2025-03-02".into()),
///     date_utc: None,
///     mode: Mode::Optimal,
///     origin: Origin::new(5.5, 95.2),
///     boat: Boat { speed_kmh: 20.0, burn_lph: 10.0, fuel_price: 10_000.0 },
///     constraints: Constraints::default(),
/// };
/// let now = Utc.with_ymd_and_hms(2025, 3, 2, 6, 0, 0).single().expect("valid time");
///
/// let result = Recommender::new(store).recommend_at(&request, now).expect("recommendation");
/// assert!(result.ok);
/// assert_eq!(result.date, date);
/// ```
#[derive(Debug, Clone)]
pub struct Recommender<S> {
    store: S,
    config: RecommenderConfig,
}

impl<S: SnapshotStore> Recommender<S> {
    /// Create an engine with the default configuration.
    pub fn new(store: S) -> Self {
        Self::with_config(store, RecommenderConfig::default())
    }

    /// Create an engine with explicit settings.
    pub const fn with_config(store: S, config: RecommenderConfig) -> Self {
        Self { store, config }
    }

    /// Settings in use.
    pub const fn config(&self) -> RecommenderConfig {
        self.config
    }

    /// Underlying snapshot store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Recommend spots using the system clock.
    ///
    /// # Errors
    ///
    /// See [`Recommender::recommend_at`].
    pub fn recommend(
        &self,
        request: &RecommendRequest,
    ) -> Result<RecommendationResult, RecommendError> {
        self.recommend_at(request, Utc::now())
    }

    /// Recommend spots as of `now`.
    ///
    /// `now` supplies the default request date and `generated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`RecommendError`] when the request is invalid, no snapshot
    /// exists within the look-back window, or the snapshot is unreadable.
    pub fn recommend_at(
        &self,
        request: &RecommendRequest,
        now: DateTime<Utc>,
    ) -> Result<RecommendationResult, RecommendError> {
        request.validate()?;
        let requested = request.requested_date(now.date_naive())?;
        let reference = resolve_snapshot(&self.store, requested, self.config.max_back_days)?;
        if reference.date_used != requested {
            log::info!(
                "requested {requested}, using snapshot from {}",
                reference.date_used
            );
        }
        let catalog = load_catalog(&self.store, &reference)?;
        let candidates = filter_candidates(
            catalog.spots,
            &request.origin,
            &request.boat,
            &request.constraints,
            request.mode,
        );
        Ok(assemble(request, reference.date_used, now, candidates))
    }
}
