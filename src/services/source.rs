use thiserror::Error;

use crate::services::{
    csv_loader::CsvLoader,
    ingest::{IngestError, IngestReport},
    upstream::{UpstreamClient, UpstreamError},
};

/// Errors from any hospital data source
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Ingest error: {0}")]
    Ingest(#[from] IngestError),

    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("Blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Where the hospital list comes from
pub enum HospitalSource {
    Csv(CsvLoader),
    Upstream(UpstreamClient),
}

impl HospitalSource {
    pub fn describe(&self) -> String {
        match self {
            HospitalSource::Csv(loader) => format!("csv:{}", loader.path().display()),
            HospitalSource::Upstream(client) => format!("upstream:{}", client.base_url()),
        }
    }

    /// Load the full dataset
    pub async fn load(&self) -> Result<IngestReport, SourceError> {
        let report = match self {
            HospitalSource::Csv(loader) => {
                let loader = loader.clone();
                tokio::task::spawn_blocking(move || loader.load()).await??
            }
            HospitalSource::Upstream(client) => client.fetch_hospitals().await?,
        };

        if report.skipped > 0 {
            tracing::warn!(
                "Skipped {} invalid hospital rows from {}",
                report.skipped,
                self.describe()
            );
        }

        Ok(report)
    }
}
