//! Departure point, vessel economics and search constraints for one trip.

use geo::Coord;
use serde::{Deserialize, Serialize};

/// Default search radius around the origin, in kilometres.
pub const DEFAULT_MAX_RADIUS_KM: f64 = 120.0;
/// Default minimum FGI a spot must reach.
pub const DEFAULT_FGI_MIN: f64 = 0.1;
/// Default number of entries per ranking.
pub const DEFAULT_TOP_N: u16 = 5;
/// Largest accepted `top_n`.
pub const MAX_TOP_N: u16 = 50;

/// Port or launch point the vessel departs from.
///
/// # Examples
/// ```
/// use nelaya_core::Origin;
///
/// let origin = Origin::new(5.5, 95.2).with_name("Lampulo");
/// assert_eq!(origin.location().y, 5.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Origin {
    /// Caller-supplied identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Human-readable name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

impl Origin {
    /// Construct an anonymous origin.
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self {
            id: None,
            name: None,
            lat,
            lon,
        }
    }

    /// Attach a display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Position as a `geo` coordinate (`x = lon`, `y = lat`).
    pub const fn location(&self) -> Coord<f64> {
        Coord {
            x: self.lon,
            y: self.lat,
        }
    }
}

/// Vessel economics used to cost a round trip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Boat {
    /// Cruising speed in km/h.
    pub speed_kmh: f64,
    /// Fuel burn in litres per hour.
    pub burn_lph: f64,
    /// Fuel price per litre, in rupiah.
    pub fuel_price: f64,
}

/// Travel economics of reaching a spot and returning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TripEconomics {
    /// One-way travel time in minutes.
    pub eta_min_oneway: f64,
    /// Fuel burnt over the round trip, in litres.
    pub fuel_l_roundtrip: f64,
    /// Cost of that fuel, in rupiah.
    pub fuel_cost_rp: f64,
}

impl Boat {
    /// Cost a round trip to a spot `distance_km` away.
    ///
    /// `speed_kmh` must be positive; request validation guarantees it.
    ///
    /// # Examples
    /// ```
    /// use nelaya_core::Boat;
    ///
    /// let boat = Boat { speed_kmh: 20.0, burn_lph: 10.0, fuel_price: 10_000.0 };
    /// let trip = boat.trip_economics(10.0);
    /// assert_eq!(trip.eta_min_oneway, 30.0);
    /// assert_eq!(trip.fuel_l_roundtrip, 10.0);
    /// assert_eq!(trip.fuel_cost_rp, 100_000.0);
    /// ```
    pub fn trip_economics(&self, distance_km: f64) -> TripEconomics {
        let eta_min_oneway = distance_km / self.speed_kmh * 60.0;
        let hours_roundtrip = 2.0 * distance_km / self.speed_kmh;
        let fuel_l_roundtrip = hours_roundtrip * self.burn_lph;
        TripEconomics {
            eta_min_oneway,
            fuel_l_roundtrip,
            fuel_cost_rp: fuel_l_roundtrip * self.fuel_price,
        }
    }
}

/// Filters and output limits for a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Constraints {
    /// Spots further than this from the origin are discarded.
    pub max_radius_km: f64,
    /// Spots below this FGI are discarded.
    pub fgi_min: f64,
    /// Maximum length of each ranking.
    pub top_n: u16,
    /// Minimum pairwise distance between ranked spots; `0` disables thinning.
    pub min_separation_km: f64,
    /// Fuel budget applied in [`Mode::Budget`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_rp: Option<f64>,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            max_radius_km: DEFAULT_MAX_RADIUS_KM,
            fgi_min: DEFAULT_FGI_MIN,
            top_n: DEFAULT_TOP_N,
            min_separation_km: 0.0,
            budget_rp: None,
        }
    }
}

impl Constraints {
    /// `top_n` as a slice length.
    pub fn limit(&self) -> usize {
        usize::from(self.top_n)
    }
}

/// Which ranking supplies the primary recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Highest FGI wins.
    #[default]
    Optimal,
    /// Cheapest trip wins; `budget_rp` is enforced.
    Budget,
}

impl Mode {
    /// Return the mode as a lowercase `&str`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Optimal => "optimal",
            Self::Budget => "budget",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "optimal" => Ok(Self::Optimal),
            "budget" => Ok(Self::Budget),
            _ => Err(format!("unknown mode '{s}'")),
        }
    }
}
