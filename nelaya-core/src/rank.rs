//! Orderings of the candidate set.
//!
//! Both orderings use [`slice::sort_by`], which is stable: spots with equal
//! keys keep their catalog order. Missing costs compare as `+inf`.

use std::cmp::Ordering;

use crate::Spot;

/// Highest FGI first; equal scores put the cheaper trip first.
pub fn compare_by_quality(a: &Spot, b: &Spot) -> Ordering {
    b.fgi
        .total_cmp(&a.fgi)
        .then_with(|| a.cost_key().total_cmp(&b.cost_key()))
}

/// Cheapest trip first; equal costs put the higher FGI first.
pub fn compare_by_cost(a: &Spot, b: &Spot) -> Ordering {
    a.cost_key()
        .total_cmp(&b.cost_key())
        .then_with(|| b.fgi.total_cmp(&a.fgi))
}

/// Return `spots` ordered by [`compare_by_quality`].
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use nelaya_core::{Spot, rank_by_quality};
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date");
/// let ranked = rank_by_quality(&[
///     Spot::new(0.0, 0.0, 0.4, date),
///     Spot::new(0.0, 0.1, 0.9, date),
/// ]);
/// assert_eq!(ranked[0].fgi, 0.9);
/// ```
pub fn rank_by_quality(spots: &[Spot]) -> Vec<Spot> {
    sorted(spots, compare_by_quality)
}

/// Return `spots` ordered by [`compare_by_cost`].
pub fn rank_by_cost(spots: &[Spot]) -> Vec<Spot> {
    sorted(spots, compare_by_cost)
}

fn sorted(spots: &[Spot], compare: fn(&Spot, &Spot) -> Ordering) -> Vec<Spot> {
    let mut ranked = spots.to_vec();
    ranked.sort_by(compare);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn spot(id: &str, fgi: f64, cost: Option<f64>) -> Spot {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date");
        let mut spot = Spot::new(0.0, 0.0, fgi, date);
        spot.id = Some(id.to_owned());
        spot.fuel_cost_rp = cost;
        spot
    }

    fn ids(spots: &[Spot]) -> Vec<&str> {
        spots.iter().filter_map(|s| s.id.as_deref()).collect()
    }

    #[rstest]
    fn quality_breaks_ties_on_cost() {
        let spots = [
            spot("a", 0.7, Some(300.0)),
            spot("b", 0.9, Some(500.0)),
            spot("c", 0.7, Some(100.0)),
            spot("d", 0.7, None),
        ];
        assert_eq!(ids(&rank_by_quality(&spots)), ["b", "c", "a", "d"]);
    }

    #[rstest]
    fn cost_breaks_ties_on_quality() {
        let spots = [
            spot("a", 0.5, Some(100.0)),
            spot("b", 0.9, None),
            spot("c", 0.8, Some(100.0)),
            spot("d", 0.6, Some(50.0)),
        ];
        assert_eq!(ids(&rank_by_cost(&spots)), ["d", "c", "a", "b"]);
    }

    #[rstest]
    #[case::quality(rank_by_quality as fn(&[Spot]) -> Vec<Spot>)]
    #[case::cost(rank_by_cost as fn(&[Spot]) -> Vec<Spot>)]
    fn equal_keys_keep_input_order(#[case] rank: fn(&[Spot]) -> Vec<Spot>) {
        let spots = [
            spot("first", 0.6, Some(10.0)),
            spot("second", 0.6, Some(10.0)),
            spot("third", 0.6, Some(10.0)),
        ];
        assert_eq!(ids(&rank(&spots)), ["first", "second", "third"]);
    }

    #[rstest]
    fn missing_costs_tie_with_each_other() {
        let spots = [spot("x", 0.4, None), spot("y", 0.4, None)];
        assert_eq!(ids(&rank_by_cost(&spots)), ["x", "y"]);
    }
}
