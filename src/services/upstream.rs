use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::services::ingest::{ingest_rows, IngestReport, RawHospitalRow};

/// Errors that can occur when fetching from the upstream hospital API
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Client for the backend that serves the raw hospital list
///
/// The backend answers `GET /api/hospitals` with `{"hospitals": [...]}` on
/// success and `{"error": "..."}` when it could not read its data, sometimes
/// with a 200 status.
pub struct UpstreamClient {
    base_url: String,
    client: Client,
}

impl UpstreamClient {
    /// Create a new upstream client
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, UpstreamError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn hospitals_url(&self) -> String {
        format!("{}/api/hospitals", self.base_url.trim_end_matches('/'))
    }

    /// Fetch and decode the hospital list
    pub async fn fetch_hospitals(&self) -> Result<IngestReport, UpstreamError> {
        let url = self.hospitals_url();

        tracing::debug!("Fetching hospitals from: {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Failed to fetch hospitals: {} - {}", status, body);
            return Err(UpstreamError::ApiError(format!("Failed to fetch hospitals: {}", status)));
        }

        let json: Value = response.json().await?;

        if let Some(error) = json.get("error") {
            let message = error.as_str().map(str::to_string).unwrap_or_else(|| error.to_string());
            return Err(UpstreamError::ApiError(message));
        }

        let documents = json
            .get("hospitals")
            .and_then(|h| h.as_array())
            .ok_or_else(|| UpstreamError::InvalidResponse("Missing hospitals array".into()))?;

        let rows: Vec<RawHospitalRow> = documents
            .iter()
            .filter_map(|doc| match RawHospitalRow::from_json(doc) {
                Ok(row) => Some(row),
                Err(e) => {
                    tracing::warn!("Ignoring malformed hospital entry: {}", e);
                    None
                }
            })
            .collect();

        let report = ingest_rows(rows);

        tracing::debug!(
            "Fetched {} hospitals ({} skipped) from {}",
            report.hospitals.len(),
            report.skipped,
            self.base_url
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_client_creation() {
        let client = UpstreamClient::new("http://localhost:8000/", Duration::from_secs(5)).unwrap();

        assert_eq!(client.base_url(), "http://localhost:8000/");
        assert_eq!(client.hospitals_url(), "http://localhost:8000/api/hospitals");
    }
}
