//! Property-based tests for the recommendation pipeline.
//!
//! # Invariants tested
//!
//! - **Filtering:** every candidate meets the score floor and the radius.
//! - **Quality order:** FGI never increases; equal FGI puts cheaper first.
//! - **Separation:** deduplicated rankings are pairwise far enough apart.
//! - **Calibration:** probabilities always land in `0.0..=1.0`.
//! - **Distance:** haversine is symmetric and non-negative.

use chrono::NaiveDate;
use geo::Coord;
use proptest::prelude::*;
use nelaya_core::{
    Boat, Constraints, Mode, Origin, Spot, deduplicate, distance_km, filter_candidates,
    rank_by_cost, rank_by_quality, to_band, to_prob,
};

fn origin() -> Origin {
    Origin::new(5.5, 95.2)
}

fn boat() -> Boat {
    Boat {
        speed_kmh: 20.0,
        burn_lph: 10.0,
        fuel_price: 10_000.0,
    }
}

fn spot_strategy() -> impl Strategy<Value = Spot> {
    // FGI is drawn from a coarse grid so ties occur regularly.
    (4.5_f64..6.5, 94.2_f64..96.2, 0_u8..=20).prop_map(|(lat, lon, step)| {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date");
        Spot::new(lat, lon, f64::from(step) / 20.0, date)
    })
}

fn spots_strategy(max: usize) -> impl Strategy<Value = Vec<Spot>> {
    prop::collection::vec(spot_strategy(), 0..max)
}

fn constraints_strategy() -> impl Strategy<Value = Constraints> {
    (10.0_f64..200.0, 0.0_f64..0.9, 1_u16..=50, 0.0_f64..30.0).prop_map(
        |(max_radius_km, fgi_min, top_n, min_separation_km)| Constraints {
            max_radius_km,
            fgi_min,
            top_n,
            min_separation_km,
            budget_rp: None,
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn candidates_meet_constraints(
        spots in spots_strategy(60),
        constraints in constraints_strategy(),
    ) {
        let origin = origin();
        let kept = filter_candidates(spots, &origin, &boat(), &constraints, Mode::Optimal);
        for spot in &kept {
            prop_assert!(spot.fgi >= constraints.fgi_min);
            let distance = spot.distance_km.expect("distance recorded");
            prop_assert!(distance >= 0.0);
            prop_assert!(distance <= constraints.max_radius_km);
            prop_assert!(spot.fuel_cost_rp.is_some());
        }
    }

    #[test]
    fn budget_mode_respects_budget(
        spots in spots_strategy(60),
        budget in 0.0_f64..2_000_000.0,
    ) {
        let constraints = Constraints { budget_rp: Some(budget), ..Constraints::default() };
        let kept = filter_candidates(spots, &origin(), &boat(), &constraints, Mode::Budget);
        for spot in &kept {
            prop_assert!(spot.cost_key() <= budget);
        }
    }

    #[test]
    fn quality_ranking_is_ordered(spots in spots_strategy(60)) {
        let origin = origin();
        let candidates = filter_candidates(
            spots, &origin, &boat(), &Constraints::default(), Mode::Optimal,
        );
        let ranked = rank_by_quality(&candidates);
        prop_assert_eq!(ranked.len(), candidates.len());
        for pair in ranked.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a.fgi >= b.fgi);
            if a.fgi == b.fgi {
                prop_assert!(a.cost_key() <= b.cost_key());
            }
        }
    }

    #[test]
    fn cost_ranking_is_ordered(spots in spots_strategy(60)) {
        let candidates = filter_candidates(
            spots, &origin(), &boat(), &Constraints::default(), Mode::Optimal,
        );
        let ranked = rank_by_cost(&candidates);
        for pair in ranked.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a.cost_key() <= b.cost_key());
            if a.cost_key() == b.cost_key() {
                prop_assert!(a.fgi >= b.fgi);
            }
        }
    }

    #[test]
    fn deduplicated_spots_are_separated(
        spots in spots_strategy(60),
        min_separation_km in 0.1_f64..50.0,
        limit in 1_usize..=50,
    ) {
        let ranked = rank_by_quality(&spots);
        let kept = deduplicate(&ranked, min_separation_km, limit);
        prop_assert!(kept.len() <= limit);
        for (i, a) in kept.iter().enumerate() {
            for b in kept.iter().skip(i + 1) {
                prop_assert!(distance_km(a.location(), b.location()) >= min_separation_km);
            }
        }
        if let Some(first) = ranked.first() {
            prop_assert_eq!(kept.first(), Some(first));
        }
    }

    #[test]
    fn probabilities_stay_in_unit_interval(raw in -1.0e6_f64..1.0e6) {
        let probability = to_prob(raw);
        prop_assert!((0.0..=1.0).contains(&probability));
        let _ = to_band(probability);
    }

    #[test]
    fn distance_is_symmetric(
        lat_a in -90.0_f64..=90.0, lon_a in -180.0_f64..=180.0,
        lat_b in -90.0_f64..=90.0, lon_b in -180.0_f64..=180.0,
    ) {
        let a = Coord { x: lon_a, y: lat_a };
        let b = Coord { x: lon_b, y: lat_b };
        let forward = distance_km(a, b);
        prop_assert!(forward >= 0.0);
        prop_assert!((forward - distance_km(b, a)).abs() < 1e-9);
        prop_assert_eq!(distance_km(a, a), 0.0);
    }
}
