use moka::future::Cache;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::HospitalRecord;
use crate::services::source::{HospitalSource, SourceError};

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Dataset load failed: {0}")]
    LoadFailed(Arc<SourceError>),
}

/// Shared, immutable view of the ingested dataset
pub type Dataset = Arc<Vec<HospitalRecord>>;

/// In-memory cache of the hospital dataset
///
/// The dataset is replaced wholesale when it expires or is invalidated;
/// concurrent misses share a single load.
pub struct DatasetCache {
    cache: Cache<String, Dataset>,
    last_load: RwLock<Option<LoadRecord>>,
}

impl DatasetCache {
    pub fn new(max_entries: u64, ttl_secs: u64) -> Self {
        let cache = moka::future::CacheBuilder::new(max_entries)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self {
            cache,
            last_load: RwLock::new(None),
        }
    }

    /// Get the dataset for `source`, loading it on a miss
    pub async fn get_or_load(&self, source: &HospitalSource) -> Result<Dataset, CacheError> {
        let key = CacheKey::dataset(source);

        self.cache
            .try_get_with(key.clone(), async {
                tracing::debug!("Cache miss: {}", key);
                let report = source.load().await?;

                *self.last_load.write().await = Some(LoadRecord {
                    dataset_size: report.hospitals.len(),
                    loaded_at: chrono::Utc::now(),
                });

                Ok::<Dataset, SourceError>(Arc::new(report.hospitals))
            })
            .await
            .map_err(CacheError::LoadFailed)
    }

    /// Drop the cached dataset for `source`
    ///
    /// The last successful load is still reported until the next one.
    pub async fn invalidate(&self, source: &HospitalSource) {
        self.cache.invalidate(&CacheKey::dataset(source)).await;
        tracing::debug!("Invalidated dataset cache for {}", source.describe());
    }

    /// Most recent successful load, surviving expiry of the cached entry
    pub async fn last_load(&self) -> Option<LoadRecord> {
        self.last_load.read().await.clone()
    }
}

/// Outcome of the most recent successful dataset load
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadRecord {
    #[serde(rename = "datasetSize")]
    pub dataset_size: usize,
    #[serde(rename = "loadedAt")]
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for a source's dataset
    pub fn dataset(source: &HospitalSource) -> String {
        format!("dataset:{}", source.describe())
    }
}
