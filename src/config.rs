use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::core::RadialConfig;
use crate::models::{ScoringWeights, SortOrder};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub source: SourceSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub pipeline: PipelineSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub chart: ChartSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Csv,
    Upstream,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceSettings {
    #[serde(default = "default_source_kind")]
    pub kind: SourceKind,
    #[serde(default = "default_data_path")]
    pub path: String,
    pub upstream_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            kind: default_source_kind(),
            path: default_data_path(),
            upstream_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_source_kind() -> SourceKind { SourceKind::Csv }
fn default_data_path() -> String { "data/hospitals.csv".to_string() }
fn default_timeout_secs() -> u64 { 30 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheSettings {
    pub ttl_secs: Option<u64>,
    pub max_entries: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineSettings {
    #[serde(default = "default_max_distance_km")]
    pub max_distance_km: f64,
    #[serde(default)]
    pub sort_order: SortOrder,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            max_distance_km: default_max_distance_km(),
            sort_order: SortOrder::default(),
        }
    }
}

fn default_max_distance_km() -> f64 { 10.0 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_distance_weight")]
    pub distance: f64,
    #[serde(default = "default_suggestive_factor_weight")]
    pub suggestive_factor: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            distance: default_distance_weight(),
            suggestive_factor: default_suggestive_factor_weight(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(value: &WeightsConfig) -> Self {
        ScoringWeights {
            distance: value.distance,
            suggestive_factor: value.suggestive_factor,
        }
    }
}

fn default_distance_weight() -> f64 { 0.5 }
fn default_suggestive_factor_weight() -> f64 { 0.5 }

#[derive(Debug, Clone, Deserialize)]
pub struct ChartSettings {
    #[serde(default = "default_outer_radius")]
    pub outer_radius: f64,
    #[serde(default = "default_ring_steps")]
    pub ring_steps: u32,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            outer_radius: default_outer_radius(),
            ring_steps: default_ring_steps(),
        }
    }
}

impl From<&ChartSettings> for RadialConfig {
    fn from(value: &ChartSettings) -> Self {
        RadialConfig {
            outer_radius: value.outer_radius,
            ring_steps: value.ring_steps,
        }
    }
}

fn default_outer_radius() -> f64 { 235.0 }
fn default_ring_steps() -> u32 { 5 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local configuration file (config/local.toml)
    /// 4. Environment variables (prefixed with HOSPITAL__)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., HOSPITAL__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("HOSPITAL")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = apply_source_overrides(settings)?;

        let settings: Settings = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the pipeline cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.pipeline.max_distance_km > 0.0) {
            return Err(ConfigError::Message(format!(
                "pipeline.max_distance_km must be positive, got {}",
                self.pipeline.max_distance_km
            )));
        }

        let weights = &self.scoring.weights;
        if !(weights.distance >= 0.0 && weights.suggestive_factor >= 0.0) {
            return Err(ConfigError::Message(format!(
                "scoring weights must be non-negative, got distance={} suggestive_factor={}",
                weights.distance, weights.suggestive_factor
            )));
        }

        if self.chart.ring_steps == 0 {
            return Err(ConfigError::Message("chart.ring_steps must be at least 1".to_string()));
        }

        if self.source.kind == SourceKind::Upstream && self.source.upstream_url.is_none() {
            return Err(ConfigError::Message(
                "source.upstream_url is required when source.kind = \"upstream\"".to_string(),
            ));
        }

        Ok(())
    }
}

/// Apply the short-form source variables
///
/// `HOSPITAL_DATA_PATH` selects a CSV file, `HOSPITAL_UPSTREAM_URL` switches
/// the source to the upstream API.
fn apply_source_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let data_path = env::var("HOSPITAL_DATA_PATH").ok();
    let upstream_url = env::var("HOSPITAL_UPSTREAM_URL").ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(path) = data_path {
        builder = builder
            .set_override("source.kind", "csv")?
            .set_override("source.path", path)?;
    }
    if let Some(url) = upstream_url {
        builder = builder
            .set_override("source.kind", "upstream")?
            .set_override("source.upstream_url", url)?;
    }

    builder.build()
}
