use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use hospital_finder::config::{Settings, SourceKind};
use hospital_finder::core::{RadialConfig, Recommender};
use hospital_finder::models::ScoringWeights;
use hospital_finder::routes::{self, hospitals::AppState};
use hospital_finder::services::{CsvLoader, DatasetCache, HospitalSource, UpstreamClient};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

fn init_logging(level: &str, format: &str) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

fn build_source(settings: &Settings) -> std::io::Result<HospitalSource> {
    match settings.source.kind {
        SourceKind::Csv => Ok(HospitalSource::Csv(CsvLoader::new(&settings.source.path))),
        SourceKind::Upstream => {
            let url = settings.source.upstream_url.clone().unwrap_or_default();
            UpstreamClient::new(url, Duration::from_secs(settings.source.timeout_secs))
                .map(HospitalSource::Upstream)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };

    init_logging(&settings.logging.level, &settings.logging.format);

    info!("Starting hospital finder service...");

    let source = Arc::new(build_source(&settings)?);
    info!("Hospital source: {}", source.describe());

    let cache_ttl = settings.cache.ttl_secs.unwrap_or(300);
    let cache_entries = settings.cache.max_entries.unwrap_or(16);
    let cache = Arc::new(DatasetCache::new(cache_entries, cache_ttl));

    // Warm the cache; requests retry the load if this fails
    match cache.get_or_load(&source).await {
        Ok(dataset) => info!("Loaded {} hospitals (cache TTL: {}s)", dataset.len(), cache_ttl),
        Err(e) => error!("Initial hospital load failed, will retry on demand: {}", e),
    }

    let weights = ScoringWeights::from(&settings.scoring.weights);
    let recommender = Recommender::new(weights, settings.pipeline.sort_order);

    info!(
        "Recommender initialized with weights: {:?}, sort order: {:?}",
        weights,
        settings.pipeline.sort_order
    );

    let app_state = AppState {
        source,
        cache,
        recommender,
        max_distance_km: settings.pipeline.max_distance_km,
        chart: RadialConfig::from(&settings.chart),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
