use crate::models::{Coordinate, HospitalRecord, ScoringWeights, SortOrder};
use crate::core::{filters::filter_and_sort, scoring::score_record};

/// Pick the record with the highest recommendation score
///
/// Ties go to the first maximal record in slice order. Records whose score is
/// `NaN` are never chosen. Returns `None` for an empty slice.
pub fn select_recommendation<'a>(
    hospitals: &'a [HospitalRecord],
    weights: &ScoringWeights,
) -> Option<&'a HospitalRecord> {
    select_recommendation_index(hospitals, weights).and_then(|index| hospitals.get(index))
}

/// Same as [`select_recommendation`] but returns the position in `hospitals`
pub fn select_recommendation_index(hospitals: &[HospitalRecord], weights: &ScoringWeights) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (index, hospital) in hospitals.iter().enumerate() {
        let score = score_record(hospital, weights);
        if score.is_nan() {
            continue;
        }
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((index, score)),
        }
    }

    best.map(|(index, _)| index)
}

/// Result of a full recommendation pass
#[derive(Debug, Clone)]
pub struct Recommendation {
    /// Hospitals within range, in pipeline order
    pub hospitals: Vec<HospitalRecord>,
    /// Index into `hospitals` of the recommended entry
    pub recommended: Option<usize>,
    /// Size of the source list before filtering
    pub total_hospitals: usize,
}

impl Recommendation {
    pub fn recommended_hospital(&self) -> Option<&HospitalRecord> {
        self.recommended.and_then(|index| self.hospitals.get(index))
    }
}

/// Recommendation orchestrator - runs the filter/sort pipeline and the selector
#[derive(Debug, Clone)]
pub struct Recommender {
    weights: ScoringWeights,
    sort_order: SortOrder,
}

impl Recommender {
    pub fn new(weights: ScoringWeights, sort_order: SortOrder) -> Self {
        Self { weights, sort_order }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
            sort_order: SortOrder::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// Copy of this recommender scoring with different weights
    pub fn with_weights(&self, weights: ScoringWeights) -> Self {
        Self {
            weights,
            sort_order: self.sort_order,
        }
    }

    /// Hospitals within `max_distance_km` of `reference`, annotated and ordered
    pub fn rank(
        &self,
        hospitals: &[HospitalRecord],
        reference: &Coordinate,
        max_distance_km: f64,
    ) -> Vec<HospitalRecord> {
        filter_and_sort(hospitals, reference, max_distance_km, self.sort_order)
    }

    /// Run the whole pipeline and select a recommendation
    pub fn evaluate(
        &self,
        hospitals: &[HospitalRecord],
        reference: &Coordinate,
        max_distance_km: f64,
    ) -> Recommendation {
        let ranked = self.rank(hospitals, reference, max_distance_km);
        let recommended = select_recommendation_index(&ranked, &self.weights);

        tracing::debug!(
            "Ranked {} of {} hospitals within {} km, recommended: {:?}",
            ranked.len(),
            hospitals.len(),
            max_distance_km,
            recommended.and_then(|index| ranked.get(index)).map(|h| h.name.as_str())
        );

        Recommendation {
            hospitals: ranked,
            recommended,
            total_hospitals: hospitals.len(),
        }
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
