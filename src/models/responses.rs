use serde::{Deserialize, Serialize};

use crate::core::scoring::score_record;
use crate::models::domain::{Coordinate, HospitalRecord, MarkerTier, ScoringWeights};

/// Response for the raw hospital list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HospitalsResponse {
    pub hospitals: Vec<HospitalRecord>,
}

/// A ranked hospital with its score and marker class
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyHospital {
    #[serde(flatten)]
    pub hospital: HospitalRecord,
    pub score: f64,
    #[serde(rename = "markerTier")]
    pub marker_tier: MarkerTier,
}

impl NearbyHospital {
    pub fn from_record(hospital: HospitalRecord, weights: &ScoringWeights) -> Self {
        Self {
            score: score_record(&hospital, weights),
            marker_tier: hospital.marker_tier(),
            hospital,
        }
    }
}

/// Response for the nearby endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyResponse {
    pub reference: Coordinate,
    #[serde(rename = "maxDistanceKm")]
    pub max_distance_km: f64,
    pub hospitals: Vec<NearbyHospital>,
    pub recommendation: Option<NearbyHospital>,
    #[serde(rename = "totalHospitals")]
    pub total_hospitals: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "datasetSize")]
    pub dataset_size: Option<usize>,
    #[serde(rename = "lastLoadedAt")]
    pub last_loaded_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

/// Dataset refresh response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub success: bool,
    #[serde(rename = "datasetSize")]
    pub dataset_size: usize,
}
