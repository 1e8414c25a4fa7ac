use std::sync::Arc;
use tokio::sync::watch;

use crate::core::recommender::Recommender;
use crate::models::{Coordinate, HospitalRecord};

/// Result of one recomputation
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub reference: Coordinate,
    pub max_distance_km: f64,
    pub hospitals: Vec<HospitalRecord>,
    /// Index into `hospitals` of the recommended entry
    pub recommended: Option<usize>,
    pub total_hospitals: usize,
    pub computed_at: chrono::DateTime<chrono::Utc>,
}

impl Snapshot {
    pub fn recommended_hospital(&self) -> Option<&HospitalRecord> {
        self.recommended.and_then(|index| self.hospitals.get(index))
    }
}

/// What subscribers see
#[derive(Debug, Clone)]
pub enum SessionState {
    /// Source data or reference coordinate still missing
    NotReady,
    Ready(Arc<Snapshot>),
}

impl SessionState {
    pub fn is_ready(&self) -> bool {
        matches!(self, SessionState::Ready(_))
    }

    pub fn snapshot(&self) -> Option<&Arc<Snapshot>> {
        match self {
            SessionState::Ready(snapshot) => Some(snapshot),
            SessionState::NotReady => None,
        }
    }
}

/// Per-user recommendation context
///
/// Holds the latest hospital list and reference coordinate. Every input change
/// recomputes the full result from scratch and publishes it to subscribers;
/// nothing is patched incrementally and the most recent inputs always win.
pub struct RecommendationSession {
    recommender: Recommender,
    max_distance_km: f64,
    hospitals: Option<Arc<Vec<HospitalRecord>>>,
    reference: Option<Coordinate>,
    state: watch::Sender<SessionState>,
}

impl RecommendationSession {
    pub fn new(recommender: Recommender, max_distance_km: f64) -> Self {
        let (state, _) = watch::channel(SessionState::NotReady);
        Self {
            recommender,
            max_distance_km,
            hospitals: None,
            reference: None,
            state,
        }
    }

    /// Receiver that observes every published state, starting with the current one
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn reference(&self) -> Option<Coordinate> {
        self.reference
    }

    pub fn max_distance_km(&self) -> f64 {
        self.max_distance_km
    }

    /// Replace the source list
    pub fn set_hospitals(&mut self, hospitals: impl Into<Arc<Vec<HospitalRecord>>>) -> SessionState {
        self.hospitals = Some(hospitals.into());
        self.recompute()
    }

    /// Record a new reference coordinate (e.g. a geolocation fix)
    pub fn set_reference(&mut self, reference: Coordinate) -> SessionState {
        self.reference = Some(reference);
        self.recompute()
    }

    /// Forget the reference coordinate, e.g. when geolocation becomes unavailable
    pub fn clear_reference(&mut self) -> SessionState {
        self.reference = None;
        self.recompute()
    }

    pub fn set_max_distance(&mut self, max_distance_km: f64) -> SessionState {
        self.max_distance_km = max_distance_km;
        self.recompute()
    }

    fn recompute(&mut self) -> SessionState {
        let next = match (&self.hospitals, self.reference) {
            (Some(hospitals), Some(reference)) => {
                let result = self.recommender.evaluate(hospitals, &reference, self.max_distance_km);
                SessionState::Ready(Arc::new(Snapshot {
                    reference,
                    max_distance_km: self.max_distance_km,
                    hospitals: result.hospitals,
                    recommended: result.recommended,
                    total_hospitals: result.total_hospitals,
                    computed_at: chrono::Utc::now(),
                }))
            }
            _ => {
                tracing::debug!(
                    "Session not ready (hospitals: {}, reference: {})",
                    self.hospitals.is_some(),
                    self.reference.is_some()
                );
                SessionState::NotReady
            }
        };

        // send_replace keeps the value even when nobody is subscribed
        self.state.send_replace(next.clone());
        next
    }
}
