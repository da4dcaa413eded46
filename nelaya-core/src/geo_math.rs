//! Great-circle distances between WGS84 coordinates.
//!
//! Coordinates follow the `geo` convention of `x = longitude` and
//! `y = latitude`, both in degrees.

use geo::Coord;

/// Mean Earth radius in kilometres.
pub const EARTH_MEAN_RADIUS_KM: f64 = 6371.0088;

/// Return the haversine distance between `a` and `b` in kilometres.
///
/// The result is symmetric in its arguments and `0.0` for identical points.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use nelaya_core::distance_km;
///
/// let banda_aceh = Coord { x: 95.32, y: 5.55 };
/// assert_eq!(distance_km(banda_aceh, banda_aceh), 0.0);
///
/// let one_degree = distance_km(Coord { x: 0.0, y: 0.0 }, Coord { x: 0.0, y: 1.0 });
/// assert!((one_degree - 111.19).abs() < 0.01);
/// ```
pub fn distance_km(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let lat_a = a.y.to_radians();
    let lat_b = b.y.to_radians();
    let half_dlat = (b.y - a.y).to_radians() / 2.0;
    let half_dlon = (b.x - a.x).to_radians() / 2.0;
    let h = half_dlat.sin().powi(2) + lat_a.cos() * lat_b.cos() * half_dlon.sin().powi(2);
    // Rounding can push `h` marginally above one for antipodal points.
    2.0 * EARTH_MEAN_RADIUS_KM * h.clamp(0.0, 1.0).sqrt().asin()
}
