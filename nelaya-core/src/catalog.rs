//! Parse a daily snapshot into candidate spots.
//!
//! Snapshots are GeoJSON point collections produced by an external job.
//! Individual features are frequently incomplete, so every feature goes
//! through [`parse_feature`], which either yields a [`Spot`] or names the
//! reason it was skipped. Only a document that cannot be read as a JSON
//! object fails the whole load.

use chrono::NaiveDate;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::snapshot::{SnapshotReference, SnapshotStore};
use crate::{Band, Spot, parse_date};

/// Errors that make a snapshot unusable as a whole.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The store could not read the artefact.
    #[error("failed to read snapshot for {date}")]
    Read {
        /// Day of the snapshot that failed.
        date: NaiveDate,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The artefact was not valid JSON.
    #[error("snapshot is not valid JSON")]
    Json {
        /// Parser error.
        #[source]
        source: serde_json::Error,
    },
    /// The top-level JSON value was not an object.
    #[error("snapshot document is not a JSON object")]
    NotAnObject,
}

/// Why a feature was left out of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The feature itself was not a JSON object.
    MalformedFeature,
    /// Geometry was missing or not a `Point`.
    NotAPoint,
    /// Coordinates were missing, too short, or not numeric.
    BadCoordinates,
    /// The `score` property was missing or not numeric.
    MissingScore,
    /// The `score` property was NaN or infinite.
    NonFiniteScore,
}

/// Result of parsing a single feature.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureOutcome {
    /// The feature produced a spot.
    Parsed(Spot),
    /// The feature was skipped.
    Skipped(SkipReason),
}

/// Spots loaded from one snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpotCatalog {
    /// Spots in document order.
    pub spots: Vec<Spot>,
    /// Number of features that were skipped.
    pub skipped: usize,
}

/// Read and parse the snapshot behind `reference`.
///
/// # Errors
///
/// Returns [`CatalogError`] when the artefact cannot be read or is not a JSON
/// object.
pub fn load_catalog<S>(store: &S, reference: &SnapshotReference) -> Result<SpotCatalog, CatalogError>
where
    S: SnapshotStore + ?Sized,
{
    let text = store
        .read_snapshot(reference)
        .map_err(|source| CatalogError::Read {
            date: reference.date_used,
            source,
        })?;
    let catalog = parse_catalog(&text, reference.date_used)?;
    if catalog.skipped > 0 {
        log::warn!(
            "skipped {} malformed feature(s) in snapshot {}",
            catalog.skipped,
            reference.date_used
        );
    }
    Ok(catalog)
}

/// Parse snapshot text. `date_used` is the fallback date for features that
/// carry none.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use nelaya_core::parse_catalog;
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date");
/// let text = r#"{"features": [
///     {"geometry": {"type": "Point", "coordinates": [95.1, 5.6]}, "properties": {"score": 0.8}},
///     {"geometry": {"type": "LineString", "coordinates": []}, "properties": {"score": 0.9}}
/// ]}"#;
///
/// let catalog = parse_catalog(text, date).expect("valid document");
/// assert_eq!(catalog.spots.len(), 1);
/// assert_eq!(catalog.skipped, 1);
/// ```
pub fn parse_catalog(text: &str, date_used: NaiveDate) -> Result<SpotCatalog, CatalogError> {
    let document: Value =
        serde_json::from_str(text).map_err(|source| CatalogError::Json { source })?;
    let Value::Object(document) = document else {
        return Err(CatalogError::NotAnObject);
    };
    let Some(Value::Array(features)) = document.get("features") else {
        return Ok(SpotCatalog::default());
    };

    let mut catalog = SpotCatalog {
        spots: Vec::with_capacity(features.len()),
        skipped: 0,
    };
    for feature in features {
        match parse_feature(feature, date_used) {
            FeatureOutcome::Parsed(spot) => catalog.spots.push(spot),
            FeatureOutcome::Skipped(reason) => {
                log::trace!("skipping feature: {reason:?}");
                catalog.skipped += 1;
            }
        }
    }
    Ok(catalog)
}

/// Parse one GeoJSON feature.
pub fn parse_feature(feature: &Value, date_used: NaiveDate) -> FeatureOutcome {
    match try_parse_feature(feature, date_used) {
        Ok(spot) => FeatureOutcome::Parsed(spot),
        Err(reason) => FeatureOutcome::Skipped(reason),
    }
}

fn try_parse_feature(feature: &Value, date_used: NaiveDate) -> Result<Spot, SkipReason> {
    let feature = feature.as_object().ok_or(SkipReason::MalformedFeature)?;
    let (lon, lat) = point_coordinates(feature)?;

    let empty = Map::new();
    let properties = feature
        .get("properties")
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    let score = properties
        .get("score")
        .and_then(number)
        .ok_or(SkipReason::MissingScore)?;
    if !score.is_finite() {
        return Err(SkipReason::NonFiniteScore);
    }

    let date = ["date_utc", "date"]
        .iter()
        .filter_map(|key| properties.get(*key).and_then(Value::as_str))
        .find_map(|raw| parse_date(raw).ok())
        .unwrap_or(date_used);

    let mut spot = Spot::new(lat, lon, score, date);
    spot.id = properties.get("id").and_then(identifier);
    spot.band = properties
        .get("band")
        .and_then(Value::as_str)
        .map_or(Band::Unknown, Band::from_label);
    spot.sst_c = properties.get("sst_c").and_then(number);
    spot.sal_psu = properties.get("sal_psu").and_then(number);
    spot.chl_mg_m3 = properties.get("chl_mg_m3").and_then(number);
    Ok(spot)
}

fn point_coordinates(feature: &Map<String, Value>) -> Result<(f64, f64), SkipReason> {
    let geometry = feature
        .get("geometry")
        .and_then(Value::as_object)
        .ok_or(SkipReason::NotAPoint)?;
    if geometry.get("type").and_then(Value::as_str) != Some("Point") {
        return Err(SkipReason::NotAPoint);
    }
    let coordinates = geometry
        .get("coordinates")
        .and_then(Value::as_array)
        .ok_or(SkipReason::BadCoordinates)?;
    let mut axes = coordinates.iter().map(number);
    match (axes.next().flatten(), axes.next().flatten()) {
        (Some(lon), Some(lat)) if lon.is_finite() && lat.is_finite() => Ok((lon, lat)),
        _ => Err(SkipReason::BadCoordinates),
    }
}

/// Accept JSON numbers and numeric strings.
fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn identifier(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
