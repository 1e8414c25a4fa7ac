// Property tests for the distance, scoring and pipeline invariants

use hospital_finder::core::{
    distance::haversine_distance,
    filters::filter_and_sort,
    recommender::select_recommendation,
    scoring::{recommendation_score, score_record},
};
use hospital_finder::models::{Coordinate, HospitalRecord, ScoringWeights, SortOrder};
use proptest::prelude::*;

fn latitude() -> impl Strategy<Value = f64> {
    -90.0f64..=90.0
}

fn longitude() -> impl Strategy<Value = f64> {
    -180.0f64..=180.0
}

fn weights() -> impl Strategy<Value = ScoringWeights> {
    (0.0f64..=1.0, 0.0f64..=1.0).prop_map(|(distance, suggestive_factor)| ScoringWeights {
        distance,
        suggestive_factor,
    })
}

/// Hospitals scattered within roughly half a degree of the reference
fn hospitals_near(reference: Coordinate) -> impl Strategy<Value = Vec<HospitalRecord>> {
    prop::collection::vec((-0.5f64..0.5, -0.5f64..0.5, 0.0f64..10.0), 0..40).prop_map(move |rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (dlat, dlng, sf))| {
                HospitalRecord::new(
                    format!("Hospital {}", i),
                    reference.latitude + dlat,
                    reference.longitude + dlng,
                    sf,
                )
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn distance_is_symmetric(lat1 in latitude(), lon1 in longitude(), lat2 in latitude(), lon2 in longitude()) {
        let ab = haversine_distance(lat1, lon1, lat2, lon2);
        let ba = haversine_distance(lat2, lon2, lat1, lon1);
        prop_assert!((ab - ba).abs() < 1e-6);
    }

    #[test]
    fn distance_is_non_negative_and_bounded(lat1 in latitude(), lon1 in longitude(), lat2 in latitude(), lon2 in longitude()) {
        let d = haversine_distance(lat1, lon1, lat2, lon2);
        prop_assert!(d >= 0.0);
        // Half the circumference
        prop_assert!(d <= std::f64::consts::PI * 6371.0 + 1e-6);
    }

    #[test]
    fn distance_to_self_is_zero(lat in latitude(), lon in longitude()) {
        prop_assert!(haversine_distance(lat, lon, lat, lon).abs() < 1e-9);
    }

    #[test]
    fn distance_grows_with_separation(a in 0.0f64..=180.0, b in 0.0f64..=180.0) {
        let (near, far) = if a <= b { (a, b) } else { (b, a) };
        let d_near = haversine_distance(0.0, 0.0, 0.0, near);
        let d_far = haversine_distance(0.0, 0.0, 0.0, far);
        prop_assert!(d_near <= d_far + 1e-9);
    }

    #[test]
    fn score_rises_with_factor(sf in 0.0f64..10.0, bump in 0.01f64..5.0, d in 0.01f64..50.0, w in weights()) {
        prop_assume!(w.suggestive_factor > 0.0);
        prop_assert!(recommendation_score(sf + bump, d, &w) > recommendation_score(sf, d, &w));
    }

    #[test]
    fn score_falls_with_distance(sf in 0.0f64..10.0, d in 0.01f64..50.0, extra in 0.01f64..50.0, w in weights()) {
        prop_assume!(w.distance > 0.0);
        prop_assert!(recommendation_score(sf, d + extra, &w) < recommendation_score(sf, d, &w));
    }

    #[test]
    fn score_is_finite(sf in 0.0f64..10.0, d in 0.0f64..50.0, w in weights()) {
        prop_assert!(recommendation_score(sf, d, &w).is_finite());
    }

    #[test]
    fn pipeline_keeps_only_nearby_in_order(
        (reference, hospitals) in (latitude().prop_map(|l| l.clamp(-80.0, 80.0)), longitude())
            .prop_flat_map(|(lat, lng)| {
                let reference = Coordinate::new(lat, lng);
                (Just(reference), hospitals_near(reference))
            }),
        max_distance_km in 1.0f64..60.0,
    ) {
        let result = filter_and_sort(&hospitals, &reference, max_distance_km, SortOrder::Ascending);

        prop_assert!(result.len() <= hospitals.len());
        for h in &result {
            prop_assert!(h.distance_km <= max_distance_km);
            prop_assert!((h.distance_km - reference.distance_to(&h.coordinate())).abs() < 1e-9);
        }
        for pair in result.windows(2) {
            prop_assert!(pair[0].suggestive_factor <= pair[1].suggestive_factor);
        }

        // Nothing within range was dropped
        let expected = hospitals
            .iter()
            .filter(|h| reference.distance_to(&h.coordinate()) <= max_distance_km)
            .count();
        prop_assert_eq!(result.len(), expected);
    }

    #[test]
    fn recommendation_dominates(
        hospitals in hospitals_near(Coordinate::new(40.7128, -74.0060)),
        w in weights(),
    ) {
        let reference = Coordinate::new(40.7128, -74.0060);
        let ranked = filter_and_sort(&hospitals, &reference, 100.0, SortOrder::Ascending);

        match select_recommendation(&ranked, &w) {
            None => prop_assert!(ranked.is_empty()),
            Some(best) => {
                let best_score = score_record(best, &w);
                for h in &ranked {
                    prop_assert!(score_record(h, &w) <= best_score);
                }
            }
        }
    }
}
