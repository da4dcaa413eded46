use chrono::NaiveDate;
use geo::Coord;
use serde::{Deserialize, Serialize};

use crate::{Band, TripEconomics};

/// A candidate fishing ground taken from a daily snapshot.
///
/// The catalog loader fills the geometry and score fields; the candidate
/// filter adds the distance and trip economics once the spot survives.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use nelaya_core::{Band, Spot};
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date");
/// let spot = Spot::new(5.6, 95.1, 0.82, date);
///
/// assert_eq!(spot.band, Band::Unknown);
/// assert!(spot.distance_km.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spot {
    /// Feature identifier, when the snapshot supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Calibrated suitability probability in `0.0..=1.0`.
    pub fgi: f64,
    /// Qualitative tier carried by the snapshot.
    #[serde(default)]
    pub band: Band,
    /// Day the score applies to.
    pub date: NaiveDate,
    /// Great-circle distance from the origin.
    #[serde(default)]
    pub distance_km: Option<f64>,
    /// One-way travel time in minutes.
    #[serde(default)]
    pub eta_min_oneway: Option<f64>,
    /// Round-trip fuel in litres.
    #[serde(default)]
    pub fuel_l_roundtrip: Option<f64>,
    /// Round-trip fuel cost in rupiah.
    #[serde(default)]
    pub fuel_cost_rp: Option<f64>,
    /// Sea surface temperature in °C.
    #[serde(default)]
    pub sst_c: Option<f64>,
    /// Salinity in PSU.
    #[serde(default)]
    pub sal_psu: Option<f64>,
    /// Chlorophyll-a in mg/m³.
    #[serde(default)]
    pub chl_mg_m3: Option<f64>,
}

impl Spot {
    /// Construct a spot with only geometry and score populated.
    ///
    /// `fgi` is clamped into `0.0..=1.0`.
    pub fn new(lat: f64, lon: f64, fgi: f64, date: NaiveDate) -> Self {
        Self {
            id: None,
            lat,
            lon,
            fgi: fgi.clamp(0.0, 1.0),
            band: Band::Unknown,
            date,
            distance_km: None,
            eta_min_oneway: None,
            fuel_l_roundtrip: None,
            fuel_cost_rp: None,
            sst_c: None,
            sal_psu: None,
            chl_mg_m3: None,
        }
    }

    /// Position as a `geo` coordinate (`x = lon`, `y = lat`).
    pub const fn location(&self) -> Coord<f64> {
        Coord {
            x: self.lon,
            y: self.lat,
        }
    }

    /// Record the distance from the origin and the trip economics.
    pub fn enrich(&mut self, distance_km: f64, trip: TripEconomics) {
        self.distance_km = Some(distance_km);
        self.eta_min_oneway = Some(trip.eta_min_oneway);
        self.fuel_l_roundtrip = Some(trip.fuel_l_roundtrip);
        self.fuel_cost_rp = Some(trip.fuel_cost_rp);
    }

    /// Fuel cost used for ordering; unknown costs sort last.
    pub fn cost_key(&self) -> f64 {
        self.fuel_cost_rp.unwrap_or(f64::INFINITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date")
    }

    #[test]
    fn fgi_is_clamped() {
        assert_eq!(Spot::new(0.0, 0.0, 1.4, date()).fgi, 1.0);
        assert_eq!(Spot::new(0.0, 0.0, -0.2, date()).fgi, 0.0);
    }

    #[test]
    fn missing_cost_sorts_last() {
        let spot = Spot::new(0.0, 0.0, 0.5, date());
        assert_eq!(spot.cost_key(), f64::INFINITY);
    }

    #[test]
    fn enrich_records_economics() {
        let mut spot = Spot::new(0.0, 0.0, 0.5, date());
        spot.enrich(
            12.0,
            TripEconomics {
                eta_min_oneway: 36.0,
                fuel_l_roundtrip: 9.6,
                fuel_cost_rp: 96_000.0,
            },
        );
        assert_eq!(spot.distance_km, Some(12.0));
        assert_eq!(spot.cost_key(), 96_000.0);
    }
}
