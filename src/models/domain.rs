use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::distance::haversine_distance;

/// Geographic position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// True when both components are finite and inside their degree ranges
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Great-circle distance to `other` in kilometers
    #[inline]
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        haversine_distance(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

impl From<Coordinate> for geo::Point<f64> {
    fn from(value: Coordinate) -> Self {
        geo::Point::new(value.longitude, value.latitude)
    }
}

/// A single facility, optionally annotated with its distance from a reference point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HospitalRecord {
    pub name: String,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
    #[serde(default)]
    pub website: String,
    #[serde(rename = "suggestiveFactor")]
    pub suggestive_factor: f64,
    #[serde(default)]
    pub beds: Option<u32>,
    #[serde(default)]
    pub patients: Option<u32>,
    #[serde(default)]
    pub staff: Option<u32>,
    #[serde(default)]
    pub trauma: Option<f64>,
    #[serde(default)]
    pub helipad: Option<u32>,
    /// Kilometers from the reference coordinate; zero until computed
    #[serde(rename = "distance", default)]
    pub distance_km: f64,
}

impl HospitalRecord {
    /// Minimal record with no capacity data, mostly useful for tests and fixtures
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64, suggestive_factor: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
            website: String::new(),
            suggestive_factor,
            beds: None,
            patients: None,
            staff: None,
            trauma: None,
            helipad: None,
            distance_km: 0.0,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    pub fn has_valid_coordinate(&self) -> bool {
        self.coordinate().is_valid()
    }

    /// Copy of this record with `distance_km` recomputed against `reference`
    pub fn with_distance_from(&self, reference: &Coordinate) -> Self {
        Self {
            distance_km: reference.distance_to(&self.coordinate()),
            ..self.clone()
        }
    }

    pub fn marker_tier(&self) -> MarkerTier {
        MarkerTier::for_factor(self.suggestive_factor)
    }
}

/// Map marker class derived from the suggestive factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerTier {
    Favoured,
    Neutral,
    Discouraged,
}

impl MarkerTier {
    pub fn for_factor(suggestive_factor: f64) -> Self {
        if suggestive_factor > 1.0 {
            MarkerTier::Favoured
        } else if suggestive_factor < 1.0 {
            MarkerTier::Discouraged
        } else {
            MarkerTier::Neutral
        }
    }
}

/// Direction of the suggestive factor sort applied by the pipeline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Lowest suggestive factor first
    #[default]
    Ascending,
    Descending,
}

/// Scoring weights
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct ScoringWeights {
    #[validate(range(min = 0.0))]
    pub distance: f64,
    #[validate(range(min = 0.0))]
    #[serde(rename = "suggestiveFactor", alias = "suggestive_factor")]
    pub suggestive_factor: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            distance: 0.5,
            suggestive_factor: 0.5,
        }
    }
}
