//! Hospital Finder - nearby hospital filtering and recommendation
//!
//! This library ranks hospitals around a reference coordinate by great-circle
//! distance and a precomputed suggestive factor, and picks a single
//! recommendation. It also ships the ingestion, caching and HTTP layers used by
//! the `hospital-finder` service.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    distance::haversine_distance, filter_and_sort, recommendation_score, select_recommendation, RecommendationSession,
    Recommender,
};
pub use models::{Coordinate, HospitalRecord, ScoringWeights, SortOrder};
