use crate::models::{Coordinate, HospitalRecord, SortOrder};

/// Check whether an annotated record lies inside the search radius
///
/// The boundary is inclusive: a hospital exactly `max_distance_km` away is kept.
#[inline]
pub fn is_within_distance(record: &HospitalRecord, max_distance_km: f64) -> bool {
    record.distance_km <= max_distance_km
}

/// Annotate, filter and order hospitals relative to a reference coordinate
///
/// # Pipeline Stages
/// 1. Skip records whose coordinate is not finite and in range
/// 2. Copy each record with its distance from `reference`
/// 3. Keep records within `max_distance_km`
/// 4. Stable sort by suggestive factor in the requested direction
///
/// The input slice is never modified.
pub fn filter_and_sort(
    hospitals: &[HospitalRecord],
    reference: &Coordinate,
    max_distance_km: f64,
    order: SortOrder,
) -> Vec<HospitalRecord> {
    let mut nearby: Vec<HospitalRecord> = hospitals
        .iter()
        .filter(|hospital| hospital.has_valid_coordinate())
        .map(|hospital| hospital.with_distance_from(reference))
        .filter(|hospital| is_within_distance(hospital, max_distance_km))
        .collect();

    sort_by_suggestive_factor(&mut nearby, order);

    nearby
}

/// Stable sort on the suggestive factor
pub fn sort_by_suggestive_factor(hospitals: &mut [HospitalRecord], order: SortOrder) {
    match order {
        SortOrder::Ascending => {
            hospitals.sort_by(|a, b| a.suggestive_factor.total_cmp(&b.suggestive_factor))
        }
        SortOrder::Descending => {
            hospitals.sort_by(|a, b| b.suggestive_factor.total_cmp(&a.suggestive_factor))
        }
    }
}
