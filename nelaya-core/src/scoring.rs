//! Score ocean conditions through an external scoring collaborator.
//!
//! The [`ScoringService`] trait is the seam between the engine and whatever
//! model produces raw suitability scalars. Callers never consume the raw
//! value directly: [`score_conditions`] runs it through the normaliser and
//! degrades any failure to [`Band::Unknown`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Band, to_band, to_prob};

/// Environmental readings for a single location and day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Conditions {
    /// Sea surface temperature in °C.
    pub temp_c: f64,
    /// Salinity in PSU.
    pub sal_psu: f64,
    /// Chlorophyll-a concentration in mg/m³.
    pub chl_mg_m3: f64,
}

impl Conditions {
    /// Construct a reading set without validation.
    pub const fn new(temp_c: f64, sal_psu: f64, chl_mg_m3: f64) -> Self {
        Self {
            temp_c,
            sal_psu,
            chl_mg_m3,
        }
    }

    /// Readings in model input order.
    pub const fn as_features(&self) -> [f64; 3] {
        [self.temp_c, self.sal_psu, self.chl_mg_m3]
    }

    /// Report whether every reading is finite.
    pub fn is_finite(&self) -> bool {
        self.as_features().iter().all(|value| value.is_finite())
    }

    /// Reject negative or non-finite readings supplied by a caller.
    pub fn validate(&self) -> Result<(), ScoringError> {
        let fields = [
            ("temp", self.temp_c),
            ("sal", self.sal_psu),
            ("chl", self.chl_mg_m3),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ScoringError::InvalidConditions { field, value });
            }
        }
        Ok(())
    }
}

/// Lifecycle of a scoring collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringStatus {
    /// No model has been loaded yet.
    Uninitialised,
    /// The model is loaded and accepting requests.
    Ready,
    /// Loading failed; every request will fail.
    Unavailable,
}

impl ScoringStatus {
    /// Return the status as a lowercase `&str`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uninitialised => "uninitialised",
            Self::Ready => "ready",
            Self::Unavailable => "unavailable",
        }
    }
}

/// Errors from [`ScoringService::raw_score`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    /// The collaborator has no usable model.
    #[error("scoring model is not ready")]
    Unavailable,
    /// A reading was negative or not finite.
    #[error("{field} must be a finite, non-negative value (got {value})")]
    InvalidConditions {
        /// Name of the offending input.
        field: &'static str,
        /// Value supplied by the caller.
        value: f64,
    },
    /// The model produced a non-finite output.
    #[error("scoring model returned a non-finite output")]
    NonFiniteOutput,
}

/// Produce a raw suitability scalar (probability or logit) for conditions.
///
/// Implementations must be thread-safe so a single instance can be shared
/// across concurrent requests.
///
/// # Examples
///
/// ```rust
/// use nelaya_core::{Band, Conditions, ScoringError, ScoringService, ScoringStatus, score_conditions};
///
/// struct WarmWaterModel;
///
/// impl ScoringService for WarmWaterModel {
///     fn status(&self) -> ScoringStatus {
///         ScoringStatus::Ready
///     }
///
///     fn raw_score(&self, conditions: &Conditions) -> Result<f64, ScoringError> {
///         Ok(conditions.temp_c - 27.0)
///     }
/// }
///
/// let score = score_conditions(&WarmWaterModel, &Conditions::new(29.0, 33.0, 0.2));
/// assert_eq!(score.band, Band::High);
/// ```
pub trait ScoringService: Send + Sync {
    /// Report whether the collaborator can currently score.
    fn status(&self) -> ScoringStatus;

    /// Return the uncalibrated model output for `conditions`.
    fn raw_score(&self, conditions: &Conditions) -> Result<f64, ScoringError>;
}

/// Calibrated outcome of scoring one set of conditions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConditionScore {
    /// Raw collaborator output, when one was produced.
    pub raw: Option<f64>,
    /// Calibrated probability, or `None` when scoring failed.
    pub probability: Option<f64>,
    /// Band derived from `probability`.
    pub band: Band,
}

impl ConditionScore {
    /// Score used when the collaborator could not produce a value.
    pub const fn unknown() -> Self {
        Self {
            raw: None,
            probability: None,
            band: Band::Unknown,
        }
    }

    /// Calibrate a raw collaborator output.
    pub fn from_raw(raw: f64) -> Self {
        let probability = to_prob(raw);
        Self {
            raw: Some(raw),
            probability: Some(probability),
            band: to_band(probability),
        }
    }
}

/// Score `conditions`, degrading collaborator failures to an unknown band.
pub fn score_conditions(service: &dyn ScoringService, conditions: &Conditions) -> ConditionScore {
    match try_score_conditions(service, conditions) {
        Ok(score) => score,
        Err(err) => {
            log::warn!("scoring degraded to an unknown band: {err}");
            ConditionScore::unknown()
        }
    }
}

/// Score `conditions`, surfacing collaborator failures to the caller.
pub fn try_score_conditions(
    service: &dyn ScoringService,
    conditions: &Conditions,
) -> Result<ConditionScore, ScoringError> {
    let raw = service.raw_score(conditions)?;
    if !raw.is_finite() {
        return Err(ScoringError::NonFiniteOutput);
    }
    Ok(ConditionScore::from_raw(raw))
}
