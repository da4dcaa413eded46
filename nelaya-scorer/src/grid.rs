//! Build the daily GeoJSON snapshot from decoded grid cells.
#![forbid(unsafe_code)]

use chrono::{DateTime, NaiveDate, Utc};
use nelaya_core::{Band, Conditions, ScoringService, ScoringStatus, try_score_conditions};
use serde::{Deserialize, Serialize};

use crate::BuildError;

/// Layout tag recorded in [`SnapshotMeta::mode`].
pub const SNAPSHOT_MODE: &str = "grid_points_v1";

/// One decoded grid location with its surface readings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Sea surface temperature in °C.
    pub sst_c: f64,
    /// Salinity in PSU.
    pub sal_psu: f64,
    /// Chlorophyll-a in mg/m³.
    pub chl_mg_m3: f64,
}

impl GridCell {
    const fn conditions(&self) -> Conditions {
        Conditions::new(self.sst_c, self.sal_psu, self.chl_mg_m3)
    }

    fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite() && self.conditions().is_finite()
    }
}

/// GeoJSON feature collection for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotCollection {
    /// Always `FeatureCollection`.
    #[serde(rename = "type")]
    pub kind: String,
    /// When the snapshot was built.
    pub generated_at: DateTime<Utc>,
    /// Build metadata.
    pub meta: SnapshotMeta,
    /// Scored points.
    pub features: Vec<SnapshotFeature>,
}

/// Metadata attached to a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotMeta {
    /// Layout tag, [`SNAPSHOT_MODE`].
    pub mode: String,
    /// Number of features.
    pub count: usize,
}

/// A scored grid point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotFeature {
    /// Always `Feature`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Score and readings.
    pub properties: SnapshotProperties,
    /// Point location.
    pub geometry: PointGeometry,
}

/// Properties carried by each snapshot feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotProperties {
    /// Day the readings apply to.
    pub date_utc: NaiveDate,
    /// Calibrated probability rounded to six decimals.
    pub score: f64,
    /// Band of the calibrated probability.
    pub band: Band,
    /// Sea surface temperature in °C.
    pub sst_c: f64,
    /// Salinity in PSU.
    pub sal_psu: f64,
    /// Chlorophyll-a in mg/m³.
    pub chl_mg_m3: f64,
}

/// GeoJSON point geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointGeometry {
    /// Always `Point`.
    #[serde(rename = "type")]
    pub kind: String,
    /// `[lon, lat]`.
    pub coordinates: [f64; 2],
}

/// Round a probability to six decimals.
#[must_use]
#[expect(clippy::float_arithmetic, reason = "decimal rounding")]
pub fn round_score(probability: f64) -> f64 {
    (probability * 1e6).round() / 1e6
}

/// Score `cells` and assemble the snapshot for `date`, stamped with the
/// current time.
///
/// # Errors
/// See [`build_snapshot_at`].
pub fn build_snapshot(
    date: NaiveDate,
    cells: &[GridCell],
    service: &dyn ScoringService,
) -> Result<SnapshotCollection, BuildError> {
    build_snapshot_at(date, cells, service, Utc::now())
}

/// Score `cells` and assemble the snapshot for `date`.
///
/// Cells with non-finite coordinates or readings, and cells the model
/// cannot score, are left out.
///
/// # Errors
/// Returns [`BuildError::ModelUnavailable`] unless `service` is ready.
pub fn build_snapshot_at(
    date: NaiveDate,
    cells: &[GridCell],
    service: &dyn ScoringService,
    generated_at: DateTime<Utc>,
) -> Result<SnapshotCollection, BuildError> {
    let status = service.status();
    if status != ScoringStatus::Ready {
        return Err(BuildError::ModelUnavailable { status });
    }

    let mut skipped = 0_usize;
    let features: Vec<SnapshotFeature> = cells
        .iter()
        .filter_map(|cell| {
            let feature = score_cell(date, cell, service);
            if feature.is_none() {
                skipped += 1;
            }
            feature
        })
        .collect();
    if skipped > 0 {
        log::warn!("left {skipped} unscorable cell(s) out of the {date} snapshot");
    }

    Ok(SnapshotCollection {
        kind: "FeatureCollection".to_owned(),
        generated_at,
        meta: SnapshotMeta {
            mode: SNAPSHOT_MODE.to_owned(),
            count: features.len(),
        },
        features,
    })
}

fn score_cell(
    date: NaiveDate,
    cell: &GridCell,
    service: &dyn ScoringService,
) -> Option<SnapshotFeature> {
    if !cell.is_finite() {
        return None;
    }
    let score = match try_score_conditions(service, &cell.conditions()) {
        Ok(score) => score,
        Err(err) => {
            log::debug!("cell at ({}, {}) not scored: {err}", cell.lat, cell.lon);
            return None;
        }
    };
    let probability = score.probability?;
    Some(SnapshotFeature {
        kind: "Feature".to_owned(),
        properties: SnapshotProperties {
            date_utc: date,
            score: round_score(probability),
            band: score.band,
            sst_c: cell.sst_c,
            sal_psu: cell.sal_psu,
            chl_mg_m3: cell.chl_mg_m3,
        },
        geometry: PointGeometry {
            kind: "Point".to_owned(),
            coordinates: [cell.lon, cell.lat],
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use nelaya_core::parse_catalog;
    use nelaya_core::test_support::{FixedScoringService, UnavailableScoringService};
    use rstest::{fixture, rstest};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date")
    }

    fn generated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 2, 0, 0)
            .single()
            .expect("valid time")
    }

    #[fixture]
    fn cells() -> Vec<GridCell> {
        vec![
            GridCell {
                lat: 5.6,
                lon: 95.1,
                sst_c: 29.0,
                sal_psu: 33.0,
                chl_mg_m3: 0.2,
            },
            GridCell {
                lat: 5.7,
                lon: 95.3,
                sst_c: f64::NAN,
                sal_psu: 33.0,
                chl_mg_m3: 0.2,
            },
        ]
    }

    #[rstest]
    fn skips_non_finite_cells(cells: Vec<GridCell>) {
        let collection =
            build_snapshot_at(date(), &cells, &FixedScoringService(0.812_345_67), generated_at())
                .expect("build snapshot");
        assert_eq!(collection.meta.count, 1);
        assert_eq!(collection.meta.mode, SNAPSHOT_MODE);
        let feature = collection.features.first().expect("one feature");
        assert_eq!(feature.geometry.coordinates, [95.1, 5.6]);
        assert_eq!(feature.properties.score, 0.812_346);
        assert_eq!(feature.properties.band, Band::High);
    }

    #[rstest]
    fn refuses_without_ready_model(cells: Vec<GridCell>) {
        assert_eq!(
            build_snapshot_at(date(), &cells, &UnavailableScoringService, generated_at()),
            Err(BuildError::ModelUnavailable {
                status: ScoringStatus::Unavailable,
            })
        );
    }

    #[rstest]
    fn output_reads_back_as_catalog(cells: Vec<GridCell>) {
        let collection = build_snapshot_at(date(), &cells, &FixedScoringService(-0.5), generated_at())
            .expect("build snapshot");
        let text = serde_json::to_string(&collection).expect("encode snapshot");

        let catalog = parse_catalog(&text, date()).expect("parse snapshot");
        assert_eq!(catalog.skipped, 0);
        let spot = catalog.spots.first().expect("one spot");
        assert_eq!(spot.band, Band::Low);
        assert_eq!(spot.sst_c, Some(29.0));
        assert_eq!(spot.date, date());
    }

    #[rstest]
    fn serialises_geojson_field_names(cells: Vec<GridCell>) {
        let collection = build_snapshot_at(date(), &cells, &FixedScoringService(0.6), generated_at())
            .expect("build snapshot");
        let json = serde_json::to_value(&collection).expect("encode snapshot");
        assert_eq!(json["type"], "FeatureCollection");
        assert_eq!(json["generated_at"], "2025-03-01T02:00:00Z");
        assert_eq!(json["features"][0]["type"], "Feature");
        assert_eq!(json["features"][0]["properties"]["date_utc"], "2025-03-01");
        assert_eq!(json["features"][0]["properties"]["band"], "Medium");
    }
}
