// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod radial;
pub mod recommender;
pub mod scoring;
pub mod session;

pub use distance::{haversine_distance, distance_between};
pub use filters::{filter_and_sort, is_within_distance};
pub use radial::{radial_layout, RadialChart, RadialConfig};
pub use recommender::{select_recommendation, Recommendation, Recommender};
pub use scoring::{recommendation_score, score_record};
pub use session::{RecommendationSession, SessionState, Snapshot};
