use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::{radial_layout, RadialConfig, Recommender};
use crate::models::{
    ErrorResponse, HealthResponse, HospitalsResponse, NearbyHospital, NearbyRequest, NearbyResponse, RadialRequest,
    RefreshResponse,
};
use crate::services::{CacheError, Dataset, DatasetCache, HospitalSource};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<HospitalSource>,
    pub cache: Arc<DatasetCache>,
    pub recommender: Recommender,
    pub max_distance_km: f64,
    pub chart: RadialConfig,
}

impl AppState {
    async fn dataset(&self) -> Result<Dataset, CacheError> {
        self.cache.get_or_load(&self.source).await
    }

    /// Recommender for a request, honouring per-request weight overrides
    fn recommender_for(&self, req: &NearbyRequest) -> Recommender {
        match req.weights {
            Some(weights) => self.recommender.with_weights(weights),
            None => self.recommender.clone(),
        }
    }
}

/// Configure all hospital routes under `/api/v1`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/hospitals/nearby", web::post().to(nearby_hospitals))
        .route("/hospitals/radial", web::post().to(radial_chart))
        .route("/hospitals/refresh", web::post().to(refresh_dataset));
}

/// Configure the unversioned routes the map front end already calls
pub fn configure_legacy(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/", web::get().to(root))
        .route("/api/hospitals", web::get().to(list_hospitals));
}

fn validation_error(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

fn dataset_error(e: CacheError) -> HttpResponse {
    tracing::error!("Failed to load hospital dataset: {}", e);
    HttpResponse::InternalServerError().json(ErrorResponse {
        error: "Failed to load hospitals".to_string(),
        message: e.to_string(),
        status_code: 500,
    })
}

async fn root() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "message": "Hospital finder" }))
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    // An expired cache entry is reloaded on demand, so only a source that has
    // never loaded counts as degraded
    let last_load = state.cache.last_load().await;
    let status = if last_load.is_some() { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        dataset_size: last_load.as_ref().map(|l| l.dataset_size),
        last_loaded_at: last_load.map(|l| l.loaded_at),
    })
}

/// Raw hospital list
///
/// GET /api/hospitals
async fn list_hospitals(state: web::Data<AppState>) -> impl Responder {
    match state.dataset().await {
        Ok(dataset) => HttpResponse::Ok().json(HospitalsResponse {
            hospitals: dataset.as_ref().clone(),
        }),
        Err(e) => dataset_error(e),
    }
}

/// Nearby hospitals and recommendation
///
/// POST /api/v1/hospitals/nearby
///
/// Request body:
/// ```json
/// {
///   "latitude": 40.7128,
///   "longitude": -74.006,
///   "maxDistanceKm": 10,
///   "weights": { "distance": 0.5, "suggestiveFactor": 0.5 }
/// }
/// ```
async fn nearby_hospitals(state: web::Data<AppState>, req: web::Json<NearbyRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for nearby request: {:?}", errors);
        return validation_error(errors);
    }

    let dataset = match state.dataset().await {
        Ok(dataset) => dataset,
        Err(e) => return dataset_error(e),
    };

    let reference = req.reference();
    let max_distance_km = req.max_distance_km.unwrap_or(state.max_distance_km);
    let recommender = state.recommender_for(&req);

    let result = recommender.evaluate(&dataset, &reference, max_distance_km);
    let recommendation = result
        .recommended_hospital()
        .cloned()
        .map(|h| NearbyHospital::from_record(h, recommender.weights()));

    let response = NearbyResponse {
        reference,
        max_distance_km,
        hospitals: result
            .hospitals
            .into_iter()
            .map(|h| NearbyHospital::from_record(h, recommender.weights()))
            .collect(),
        recommendation,
        total_hospitals: result.total_hospitals,
    };

    tracing::info!(
        "Returning {} hospitals within {} km of ({}, {}) (from {})",
        response.hospitals.len(),
        max_distance_km,
        reference.latitude,
        reference.longitude,
        response.total_hospitals
    );

    HttpResponse::Ok().json(response)
}

/// Radial chart geometry for the nearby hospitals
///
/// POST /api/v1/hospitals/radial
async fn radial_chart(state: web::Data<AppState>, req: web::Json<RadialRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for radial request: {:?}", errors);
        return validation_error(errors);
    }

    let dataset = match state.dataset().await {
        Ok(dataset) => dataset,
        Err(e) => return dataset_error(e),
    };

    let max_distance_km = req.nearby.max_distance_km.unwrap_or(state.max_distance_km);
    let recommender = state.recommender_for(&req.nearby);
    let result = recommender.evaluate(&dataset, &req.nearby.reference(), max_distance_km);

    let config = RadialConfig {
        outer_radius: req.outer_radius.unwrap_or(state.chart.outer_radius),
        ..state.chart
    };

    HttpResponse::Ok().json(radial_layout(&result.hospitals, result.recommended, max_distance_km, &config))
}

/// Drop the cached dataset and load it again
///
/// POST /api/v1/hospitals/refresh
async fn refresh_dataset(state: web::Data<AppState>) -> impl Responder {
    state.cache.invalidate(&state.source).await;

    match state.dataset().await {
        Ok(dataset) => {
            tracing::info!("Reloaded {} hospitals from {}", dataset.len(), state.source.describe());
            HttpResponse::Ok().json(RefreshResponse {
                success: true,
                dataset_size: dataset.len(),
            })
        }
        Err(e) => dataset_error(e),
    }
}
