use crate::models::{HospitalRecord, ScoringWeights};

/// Distances below this are treated as this value before inversion.
///
/// One meter: a user standing at the hospital gets the largest finite
/// distance term instead of an infinite score.
pub const MIN_SCORING_DISTANCE_KM: f64 = 0.001;

/// Calculate the recommendation score for a suggestive factor and distance
///
/// Scoring formula:
/// score = (
///     suggestive_factor * weights.suggestive_factor +   # Higher = better
///     (1 / distance_km) * weights.distance              # Closer = better
/// )
#[inline]
pub fn recommendation_score(suggestive_factor: f64, distance_km: f64, weights: &ScoringWeights) -> f64 {
    let distance = distance_km.max(MIN_SCORING_DISTANCE_KM);

    weights.suggestive_factor * suggestive_factor + weights.distance * (1.0 / distance)
}

/// Score an annotated record
#[inline]
pub fn score_record(record: &HospitalRecord, weights: &ScoringWeights) -> f64 {
    recommendation_score(record.suggestive_factor, record.distance_km, weights)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weight_examples() {
        let weights = ScoringWeights::default();

        assert!((recommendation_score(9.0, 2.0, &weights) - 4.75).abs() < 1e-12);
        assert!((recommendation_score(3.0, 1.0, &weights) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_closer_scores_higher() {
        let weights = ScoringWeights::default();
        let near = recommendation_score(5.0, 1.0, &weights);
        let far = recommendation_score(5.0, 8.0, &weights);

        assert!(near > far);
    }

    #[test]
    fn test_zero_distance_is_finite() {
        let weights = ScoringWeights::default();
        let at_door = recommendation_score(5.0, 0.0, &weights);

        assert!(at_door.is_finite());
        assert_eq!(at_door, recommendation_score(5.0, MIN_SCORING_DISTANCE_KM, &weights));
        assert!(at_door > recommendation_score(5.0, 0.01, &weights));
    }

    #[test]
    fn test_zero_distance_weight_ignores_distance() {
        let weights = ScoringWeights {
            distance: 0.0,
            suggestive_factor: 1.0,
        };

        assert_eq!(recommendation_score(6.0, 0.5, &weights), 6.0);
        assert_eq!(recommendation_score(6.0, 50.0, &weights), 6.0);
    }

    #[test]
    fn test_score_record_uses_annotated_distance() {
        let mut record = HospitalRecord::new("Mercy", 0.0, 0.0, 9.0);
        record.distance_km = 2.0;

        assert!((score_record(&record, &ScoringWeights::default()) - 4.75).abs() < 1e-12);
    }
}
