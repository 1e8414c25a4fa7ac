use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{Coordinate, ScoringWeights};

/// Request to rank hospitals around a position
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NearbyRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    #[serde(alias = "lng")]
    pub longitude: f64,
    /// Falls back to the configured radius when absent
    #[validate(range(exclusive_min = 0.0))]
    #[serde(default, alias = "max_distance_km", rename = "maxDistanceKm")]
    pub max_distance_km: Option<f64>,
    /// Falls back to the configured weights when absent
    #[validate(nested)]
    #[serde(default)]
    pub weights: Option<ScoringWeights>,
}

impl NearbyRequest {
    pub fn reference(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Request for radial chart geometry
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RadialRequest {
    #[validate(nested)]
    #[serde(flatten)]
    pub nearby: NearbyRequest,
    #[validate(range(exclusive_min = 0.0))]
    #[serde(default, alias = "outer_radius", rename = "outerRadius")]
    pub outer_radius: Option<f64>,
}
