// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Coordinate, HospitalRecord, MarkerTier, ScoringWeights, SortOrder};
pub use requests::{NearbyRequest, RadialRequest};
pub use responses::{
    ErrorResponse, HealthResponse, HospitalsResponse, NearbyHospital, NearbyResponse, RefreshResponse,
};
