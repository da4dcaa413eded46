//! Greedy spatial thinning of a ranked list.

use crate::{Spot, distance_km};

/// Walk `ranked` in order, keeping a spot only when it is at least
/// `min_separation_km` from every spot already kept, and stop after `limit`
/// spots.
///
/// A non-positive separation keeps the first `limit` spots unchanged. The
/// first spot of a non-empty input is always kept.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use nelaya_core::{Spot, deduplicate};
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date");
/// let ranked = [
///     Spot::new(5.50, 95.2, 0.9, date),
///     Spot::new(5.51, 95.2, 0.8, date), // about 1.1 km away
///     Spot::new(5.70, 95.2, 0.7, date),
/// ];
/// let kept = deduplicate(&ranked, 5.0, 10);
/// assert_eq!(kept.len(), 2);
/// assert_eq!(kept[1].fgi, 0.7);
/// ```
pub fn deduplicate(ranked: &[Spot], min_separation_km: f64, limit: usize) -> Vec<Spot> {
    if min_separation_km <= 0.0 {
        return ranked.iter().take(limit).cloned().collect();
    }
    let mut kept: Vec<Spot> = Vec::with_capacity(limit.min(ranked.len()));
    for spot in ranked {
        if kept.len() >= limit {
            break;
        }
        let far_enough = kept
            .iter()
            .all(|other| distance_km(other.location(), spot.location()) >= min_separation_km);
        if far_enough {
            kept.push(spot.clone());
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    const KM_PER_DEGREE_LAT: f64 = 111.195;

    fn at_km(km: f64, fgi: f64) -> Spot {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date");
        Spot::new(5.5 + km / KM_PER_DEGREE_LAT, 95.2, fgi, date)
    }

    #[rstest]
    fn close_pair_keeps_higher_ranked() {
        let ranked = [at_km(0.0, 0.9), at_km(2.0, 0.8)];
        let kept = deduplicate(&ranked, 5.0, 5);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].fgi, 0.9);
    }

    #[rstest]
    fn checks_against_every_kept_spot() {
        // The third spot is far from the first but close to the second.
        let ranked = [at_km(0.0, 0.9), at_km(6.0, 0.8), at_km(8.0, 0.7), at_km(20.0, 0.6)];
        let kept = deduplicate(&ranked, 5.0, 5);
        let scores: Vec<f64> = kept.iter().map(|s| s.fgi).collect();
        assert_eq!(scores, vec![0.9, 0.8, 0.6]);
    }

    #[rstest]
    #[case(0.0)]
    #[case(-3.0)]
    fn non_positive_separation_only_truncates(#[case] separation: f64) {
        let ranked = [at_km(0.0, 0.9), at_km(0.0, 0.8), at_km(0.0, 0.7)];
        let kept = deduplicate(&ranked, separation, 2);
        assert_eq!(kept, ranked[..2].to_vec());
    }

    #[rstest]
    fn exact_separation_is_accepted() {
        let ranked = [at_km(0.0, 0.9), at_km(10.0, 0.8)];
        let gap = distance_km(ranked[0].location(), ranked[1].location());
        assert_eq!(deduplicate(&ranked, gap, 5).len(), 2);
    }

    #[rstest]
    fn stops_at_limit() {
        let ranked: Vec<Spot> = (0..10).map(|i| at_km(f64::from(i) * 10.0, 0.5)).collect();
        assert_eq!(deduplicate(&ranked, 5.0, 3).len(), 3);
    }

    #[rstest]
    fn empty_input_gives_empty_output() {
        assert!(deduplicate(&[], 5.0, 5).is_empty());
    }
}
