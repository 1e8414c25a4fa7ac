// Integration tests for Hospital Finder

use hospital_finder::core::{Recommender, RecommendationSession, SessionState};
use hospital_finder::models::{Coordinate, HospitalRecord, ScoringWeights, SortOrder};
use hospital_finder::services::parse_csv;
use std::io::Cursor;

const DATASET: &str = include_str!("../data/hospitals.csv");

fn manhattan() -> Coordinate {
    Coordinate::new(40.7128, -74.0060)
}

#[test]
fn test_integration_end_to_end_recommendation() {
    let report = parse_csv(Cursor::new(DATASET)).unwrap();
    assert_eq!(report.skipped, 0);

    let recommender = Recommender::with_default_weights();
    let result = recommender.evaluate(&report.hospitals, &manhattan(), 10.0);

    assert_eq!(result.total_hospitals, report.hospitals.len());
    assert!(!result.hospitals.is_empty());

    // Everything is inside the radius
    for h in &result.hospitals {
        assert!(h.distance_km <= 10.0, "{} is {} km away", h.name, h.distance_km);
    }

    // Albany and Staten Island are too far
    assert!(!result.hospitals.iter().any(|h| h.name.starts_with("Albany")));
    assert!(!result.hospitals.iter().any(|h| h.name.starts_with("Staten Island")));

    // Ascending suggestive factor
    for pair in result.hospitals.windows(2) {
        assert!(pair[0].suggestive_factor <= pair[1].suggestive_factor, "Hospitals not sorted");
    }

    // The hospital ~300m away wins on the distance term
    let recommended = result.recommended_hospital().unwrap();
    assert_eq!(recommended.name, "NewYork-Presbyterian Lower Manhattan");
}

#[test]
fn test_factor_only_weights_pick_best_rated() {
    let report = parse_csv(Cursor::new(DATASET)).unwrap();
    let recommender = Recommender::new(
        ScoringWeights {
            distance: 0.0,
            suggestive_factor: 1.0,
        },
        SortOrder::Descending,
    );

    let result = recommender.evaluate(&report.hospitals, &manhattan(), 10.0);

    assert_eq!(result.recommended, Some(0), "best rated should lead a descending list");
    assert_eq!(result.recommended_hospital().map(|h| h.name.as_str()), Some("NYU Langone Tisch Hospital"));
}

#[test]
fn test_boundary_distances() {
    // One degree of longitude at the equator is ~111.19 km, so scale offsets to hit exact distances
    let reference = Coordinate::new(0.0, 0.0);
    let km_per_degree = reference.distance_to(&Coordinate::new(0.0, 1.0));
    let at = |km: f64| km / km_per_degree;

    let hospitals = vec![
        HospitalRecord::new("five", 0.0, at(5.0), 5.0),
        HospitalRecord::new("fifteen", 0.0, at(15.0), 5.0),
        HospitalRecord::new("just-inside", 0.0, at(9.999), 5.0),
        HospitalRecord::new("just-outside", 0.0, at(10.0001), 5.0),
    ];

    let result = Recommender::default().rank(&hospitals, &reference, 10.0);
    let names: Vec<&str> = result.iter().map(|h| h.name.as_str()).collect();

    assert_eq!(names, vec!["five", "just-inside"]);
}

#[test]
fn test_session_tracks_moving_user() {
    let report = parse_csv(Cursor::new(DATASET)).unwrap();
    let mut session = RecommendationSession::new(Recommender::default(), 10.0);

    assert!(matches!(session.set_hospitals(report.hospitals), SessionState::NotReady));

    let downtown = session.set_reference(manhattan());
    let albany = session.set_reference(Coordinate::new(42.6526, -73.7562));

    let downtown = downtown.snapshot().unwrap();
    let albany = albany.snapshot().unwrap();

    assert!(downtown.hospitals.len() > 1);
    assert_eq!(albany.hospitals.len(), 1);
    assert_eq!(albany.recommended_hospital().map(|h| h.name.as_str()), Some("Albany Medical Center"));
}

#[test]
fn test_empty_dataset() {
    let result = Recommender::default().evaluate(&[], &manhattan(), 10.0);

    assert!(result.hospitals.is_empty());
    assert!(result.recommended_hospital().is_none());
}
