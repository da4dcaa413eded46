//! Filter catalog spots and cost the trip to each survivor.

use crate::{Boat, Constraints, Mode, Origin, Spot, distance_km};

/// Keep the spots reachable under `constraints` and enrich them with trip
/// economics.
///
/// A spot is discarded when its FGI is below `fgi_min`, when it lies further
/// than `max_radius_km` from the origin, or, in [`Mode::Budget`] with a
/// budget set, when the round trip costs more than `budget_rp`. Input order
/// is preserved.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use nelaya_core::{Boat, Constraints, Mode, Origin, Spot, filter_candidates};
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date");
/// let origin = Origin::new(5.5, 95.2);
/// let boat = Boat { speed_kmh: 20.0, burn_lph: 10.0, fuel_price: 10_000.0 };
/// let spots = vec![Spot::new(5.6, 95.2, 0.9, date), Spot::new(5.6, 95.2, 0.05, date)];
///
/// let kept = filter_candidates(spots, &origin, &boat, &Constraints::default(), Mode::Optimal);
/// assert_eq!(kept.len(), 1);
/// assert!(kept[0].fuel_cost_rp.is_some());
/// ```
pub fn filter_candidates(
    spots: Vec<Spot>,
    origin: &Origin,
    boat: &Boat,
    constraints: &Constraints,
    mode: Mode,
) -> Vec<Spot> {
    let budget = match mode {
        Mode::Budget => constraints.budget_rp,
        Mode::Optimal => None,
    };
    let from = origin.location();
    spots
        .into_iter()
        .filter(|spot| spot.fgi >= constraints.fgi_min)
        .filter_map(|mut spot| {
            let distance = distance_km(from, spot.location());
            if distance > constraints.max_radius_km {
                return None;
            }
            let trip = boat.trip_economics(distance);
            if budget.is_some_and(|limit| trip.fuel_cost_rp > limit) {
                return None;
            }
            spot.enrich(distance, trip);
            Some(spot)
        })
        .collect()
}
