//! Recommendation requests and their validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Boat, Constraints, MAX_TOP_N, Mode, Origin};

/// Date format accepted in requests.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parameters for a single recommendation.
///
/// # Examples
/// ```rust
/// use nelaya_core::{Boat, Constraints, Mode, Origin, RecommendRequest};
///
/// let request = RecommendRequest {
///     date: Some("2025-03-01".into()),
///     date_utc: None,
///     mode: Mode::Optimal,
///     origin: Origin::new(5.5, 95.2),
///     boat: Boat { speed_kmh: 20.0, burn_lph: 10.0, fuel_price: 10_000.0 },
///     constraints: Constraints::default(),
/// };
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendRequest {
    /// Requested snapshot day as `YYYY-MM-DD`.
    #[serde(default)]
    pub date: Option<String>,
    /// Legacy spelling of `date`, consulted when `date` is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_utc: Option<String>,
    /// Ranking that supplies the primary recommendation.
    #[serde(default)]
    pub mode: Mode,
    /// Departure point.
    pub origin: Origin,
    /// Vessel economics.
    pub boat: Boat,
    /// Filters and limits.
    #[serde(default)]
    pub constraints: Constraints,
}

/// Error returned when a request date cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid date format: {input} (expected YYYY-MM-DD)")]
pub struct InvalidDate {
    /// The rejected input.
    pub input: String,
}

/// Parse a `YYYY-MM-DD` date.
///
/// # Examples
/// ```
/// use nelaya_core::parse_date;
///
/// assert!(parse_date("2025-02-28").is_ok());
/// assert!(parse_date("2025-02-30").is_err());
/// assert!(parse_date("28/02/2025").is_err());
/// ```
pub fn parse_date(input: &str) -> Result<NaiveDate, InvalidDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| InvalidDate {
        input: input.to_owned(),
    })
}

/// Detailed validation failures for [`RecommendRequest::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestValidationError {
    /// A numeric field was NaN or infinite.
    #[error("{field} must be finite")]
    NonFinite {
        /// Path of the offending field.
        field: &'static str,
    },
    /// The origin latitude was outside `-90..=90`.
    #[error("origin.lat must be within -90..=90 (got {lat})")]
    LatitudeOutOfRange {
        /// Supplied latitude.
        lat: f64,
    },
    /// The origin longitude was outside `-180..=180`.
    #[error("origin.lon must be within -180..=180 (got {lon})")]
    LongitudeOutOfRange {
        /// Supplied longitude.
        lon: f64,
    },
    /// The boat speed was zero or negative.
    #[error("boat.speed_kmh must be greater than zero (got {speed_kmh})")]
    NonPositiveSpeed {
        /// Supplied speed.
        speed_kmh: f64,
    },
    /// A quantity that cannot be negative was negative.
    #[error("{field} must not be negative (got {value})")]
    Negative {
        /// Path of the offending field.
        field: &'static str,
        /// Supplied value.
        value: f64,
    },
    /// The search radius was zero or negative.
    #[error("constraints.max_radius_km must be greater than zero (got {max_radius_km})")]
    NonPositiveRadius {
        /// Supplied radius.
        max_radius_km: f64,
    },
    /// `top_n` was outside `1..=50`.
    #[error("constraints.top_n must be within 1..={max} (got {top_n})")]
    TopNOutOfRange {
        /// Supplied limit.
        top_n: u16,
        /// Largest accepted limit.
        max: u16,
    },
}

impl RecommendRequest {
    /// Resolve the requested day, falling back to `today` when neither
    /// `date` nor `date_utc` is set. Blank strings count as unset.
    pub fn requested_date(&self, today: NaiveDate) -> Result<NaiveDate, InvalidDate> {
        non_blank(self.date.as_deref())
            .or_else(|| non_blank(self.date_utc.as_deref()))
            .map_or(Ok(today), parse_date)
    }

    /// Check the origin, boat and constraints.
    pub fn validate(&self) -> Result<(), RequestValidationError> {
        self.validate_origin()?;
        self.validate_boat()?;
        self.validate_constraints()
    }

    fn validate_origin(&self) -> Result<(), RequestValidationError> {
        let Origin { lat, lon, .. } = self.origin;
        require_finite("origin.lat", lat)?;
        require_finite("origin.lon", lon)?;
        if !(-90.0..=90.0).contains(&lat) {
            return Err(RequestValidationError::LatitudeOutOfRange { lat });
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(RequestValidationError::LongitudeOutOfRange { lon });
        }
        Ok(())
    }

    fn validate_boat(&self) -> Result<(), RequestValidationError> {
        let Boat {
            speed_kmh,
            burn_lph,
            fuel_price,
        } = self.boat;
        require_finite("boat.speed_kmh", speed_kmh)?;
        if speed_kmh <= 0.0 {
            return Err(RequestValidationError::NonPositiveSpeed { speed_kmh });
        }
        require_non_negative("boat.burn_lph", burn_lph)?;
        require_non_negative("boat.fuel_price", fuel_price)
    }

    fn validate_constraints(&self) -> Result<(), RequestValidationError> {
        let constraints = &self.constraints;
        require_finite("constraints.max_radius_km", constraints.max_radius_km)?;
        if constraints.max_radius_km <= 0.0 {
            return Err(RequestValidationError::NonPositiveRadius {
                max_radius_km: constraints.max_radius_km,
            });
        }
        require_non_negative("constraints.fgi_min", constraints.fgi_min)?;
        if !(1..=MAX_TOP_N).contains(&constraints.top_n) {
            return Err(RequestValidationError::TopNOutOfRange {
                top_n: constraints.top_n,
                max: MAX_TOP_N,
            });
        }
        require_non_negative(
            "constraints.min_separation_km",
            constraints.min_separation_km,
        )?;
        if let Some(budget_rp) = constraints.budget_rp {
            require_non_negative("constraints.budget_rp", budget_rp)?;
        }
        Ok(())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}

fn require_finite(field: &'static str, value: f64) -> Result<(), RequestValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(RequestValidationError::NonFinite { field })
    }
}

fn require_non_negative(field: &'static str, value: f64) -> Result<(), RequestValidationError> {
    require_finite(field, value)?;
    if value < 0.0 {
        return Err(RequestValidationError::Negative { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn request() -> RecommendRequest {
        RecommendRequest {
            date: None,
            date_utc: None,
            mode: Mode::Optimal,
            origin: Origin::new(5.5, 95.2),
            boat: Boat {
                speed_kmh: 20.0,
                burn_lph: 10.0,
                fuel_price: 10_000.0,
            },
            constraints: Constraints::default(),
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[rstest]
    fn valid_request_passes(request: RecommendRequest) {
        assert_eq!(request.validate(), Ok(()));
    }

    #[rstest]
    fn date_defaults_to_today(request: RecommendRequest) {
        let today = day(2025, 3, 4);
        assert_eq!(request.requested_date(today), Ok(today));
    }

    #[rstest]
    fn date_takes_precedence_over_legacy_field(mut request: RecommendRequest) {
        request.date = Some("2025-03-01".into());
        request.date_utc = Some("2024-01-01".into());
        assert_eq!(request.requested_date(day(2025, 3, 4)), Ok(day(2025, 3, 1)));
    }

    #[rstest]
    fn legacy_date_is_used_when_date_missing(mut request: RecommendRequest) {
        request.date_utc = Some("2024-01-01".into());
        assert_eq!(request.requested_date(day(2025, 3, 4)), Ok(day(2024, 1, 1)));
    }

    #[rstest]
    #[case::empty_date(Some(""), Some("2025-03-01"), day(2025, 3, 1))]
    #[case::whitespace_date(Some("  "), Some("2025-03-01"), day(2025, 3, 1))]
    #[case::both_blank(Some(""), Some(""), day(2025, 3, 4))]
    fn blank_dates_fall_through(
        mut request: RecommendRequest,
        #[case] date: Option<&str>,
        #[case] date_utc: Option<&str>,
        #[case] expected: NaiveDate,
    ) {
        request.date = date.map(str::to_owned);
        request.date_utc = date_utc.map(str::to_owned);
        assert_eq!(request.requested_date(day(2025, 3, 4)), Ok(expected));
    }

    #[rstest]
    fn malformed_date_is_rejected(mut request: RecommendRequest) {
        request.date = Some("01-03-2025".into());
        let err = request
            .requested_date(day(2025, 3, 4))
            .expect_err("malformed date");
        assert_eq!(err.input, "01-03-2025");
    }

    #[rstest]
    fn zero_speed_is_rejected(mut request: RecommendRequest) {
        request.boat.speed_kmh = 0.0;
        assert!(matches!(
            request.validate(),
            Err(RequestValidationError::NonPositiveSpeed { .. })
        ));
    }

    #[rstest]
    #[case(0)]
    #[case(51)]
    fn top_n_outside_range_is_rejected(mut request: RecommendRequest, #[case] top_n: u16) {
        request.constraints.top_n = top_n;
        assert!(matches!(
            request.validate(),
            Err(RequestValidationError::TopNOutOfRange { .. })
        ));
    }

    #[rstest]
    fn negative_budget_is_rejected(mut request: RecommendRequest) {
        request.constraints.budget_rp = Some(-1.0);
        assert_eq!(
            request.validate(),
            Err(RequestValidationError::Negative {
                field: "constraints.budget_rp",
                value: -1.0,
            })
        );
    }

    #[rstest]
    fn out_of_range_latitude_is_rejected(mut request: RecommendRequest) {
        request.origin.lat = 91.0;
        assert!(matches!(
            request.validate(),
            Err(RequestValidationError::LatitudeOutOfRange { .. })
        ));
    }

    #[rstest]
    fn decodes_minimal_json() {
        let json = r#"{
            "origin": {"lat": 5.5, "lon": 95.2},
            "boat": {"speed_kmh": 20, "burn_lph": 10, "fuel_price": 10000}
        }"#;
        let request: RecommendRequest = serde_json::from_str(json).expect("decode request");
        assert_eq!(request.mode, Mode::Optimal);
        assert_eq!(request.constraints, Constraints::default());
    }
}
