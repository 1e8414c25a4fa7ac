// Unit tests for Hospital Finder

use hospital_finder::core::{
    distance::{distance_between, haversine_distance},
    filters::{filter_and_sort, is_within_distance},
    recommender::select_recommendation,
    scoring::{recommendation_score, MIN_SCORING_DISTANCE_KM},
};
use hospital_finder::models::{Coordinate, HospitalRecord, MarkerTier, ScoringWeights, SortOrder};

fn annotated(name: &str, suggestive_factor: f64, distance_km: f64) -> HospitalRecord {
    let mut record = HospitalRecord::new(name, 0.0, 0.0, suggestive_factor);
    record.distance_km = distance_km;
    record
}

#[test]
fn test_haversine_distance_zero() {
    let distance = haversine_distance(40.7128, -74.0060, 40.7128, -74.0060);
    assert_eq!(distance, 0.0);
}

#[test]
fn test_haversine_distance_manhattan_to_brooklyn() {
    // Manhattan to Brooklyn is approximately 5-10 km
    let distance = haversine_distance(40.7580, -73.9855, 40.6782, -73.9442);
    assert!(distance > 5.0 && distance < 15.0);
}

#[test]
fn test_equal_offsets_equal_distance_at_equator() {
    let origin = Coordinate::new(0.0, 0.0);
    let a = distance_between(&origin, &Coordinate::new(0.0, 1.0));
    let b = distance_between(&origin, &Coordinate::new(1.0, 0.0));

    assert!((a - 111.19).abs() < 0.01);
    assert!((b - 111.19).abs() < 0.01);
    assert!((a - b).abs() < 1e-9);
}

#[test]
fn test_distance_scenario_scores() {
    let weights = ScoringWeights::default();
    let h1 = annotated("H1", 9.0, 2.0);
    let h2 = annotated("H2", 3.0, 1.0);

    assert!((recommendation_score(h1.suggestive_factor, h1.distance_km, &weights) - 4.75).abs() < 1e-12);
    assert!((recommendation_score(h2.suggestive_factor, h2.distance_km, &weights) - 2.0).abs() < 1e-12);

    let hospitals = vec![h1, h2];
    let best = select_recommendation(&hospitals, &weights).unwrap();
    assert_eq!(best.name, "H1");
}

#[test]
fn test_inclusive_threshold() {
    let kept: Vec<f64> = [5.0, 15.0, 9.999, 10.0, 10.0001]
        .iter()
        .map(|&d| annotated("h", 5.0, d))
        .filter(|h| is_within_distance(h, 10.0))
        .map(|h| h.distance_km)
        .collect();

    assert_eq!(kept, vec![5.0, 9.999, 10.0]);
}

#[test]
fn test_zero_distance_policy() {
    let weights = ScoringWeights::default();
    let score = recommendation_score(5.0, 0.0, &weights);

    assert!(score.is_finite());
    assert_eq!(score, 2.5 + 0.5 / MIN_SCORING_DISTANCE_KM);
}

#[test]
fn test_hospital_at_user_location_wins() {
    let weights = ScoringWeights::default();
    let hospitals = vec![annotated("rated", 10.0, 0.5), annotated("here", 1.0, 0.0)];

    assert_eq!(select_recommendation(&hospitals, &weights).map(|h| h.name.as_str()), Some("here"));
}

#[test]
fn test_pipeline_empty_in_empty_out() {
    let result = filter_and_sort(&[], &Coordinate::new(10.0, 10.0), 10.0, SortOrder::Ascending);

    assert!(result.is_empty());
    assert!(select_recommendation(&result, &ScoringWeights::default()).is_none());
}

#[test]
fn test_marker_tiers() {
    assert_eq!(HospitalRecord::new("a", 0.0, 0.0, 4.0).marker_tier(), MarkerTier::Favoured);
    assert_eq!(HospitalRecord::new("b", 0.0, 0.0, 1.0).marker_tier(), MarkerTier::Neutral);
    assert_eq!(HospitalRecord::new("c", 0.0, 0.0, 0.5).marker_tier(), MarkerTier::Discouraged);
}
