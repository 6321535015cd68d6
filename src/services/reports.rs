use crate::models::Candidate;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when reading reports from the reports API
#[derive(Debug, Error)]
pub enum ReportsError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Unauthorized: invalid API key")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Client for the reports read API
///
/// The API returns every report (open and closed) with no server-side
/// filtering; all filtering happens in the ranking engine.
pub struct ReportsClient {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl ReportsClient {
    /// Create a new reports client
    pub fn new(
        base_url: String,
        api_key: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, ReportsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            client,
        })
    }

    /// Fetch the full report list
    ///
    /// Accepts either a bare JSON array or an object wrapping it in `reports`
    /// or `documents`. Documents that do not parse are skipped with a warning.
    pub async fn fetch_reports(&self) -> Result<Vec<Candidate>, ReportsError> {
        let url = format!("{}/reports", self.base_url.trim_end_matches('/'));

        tracing::debug!("Fetching reports from: {}", url);

        let mut request = self.client.get(&url);
        if let Some(api_key) = &self.api_key {
            request = request.header("X-Api-Key", api_key);
        }

        let response = request.send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(ReportsError::Unauthorized);
        }
        if !status.is_success() {
            return Err(ReportsError::ApiError(format!(
                "Failed to fetch reports: {}",
                status
            )));
        }

        let json: Value = response.json().await?;
        let documents = extract_documents(json)?;
        let total = documents.len();

        let reports: Vec<Candidate> = documents
            .into_iter()
            .filter_map(|doc| match serde_json::from_value::<Candidate>(doc) {
                Ok(report) => Some(report),
                Err(e) => {
                    tracing::warn!("Skipping malformed report: {}", e);
                    None
                }
            })
            .collect();

        tracing::info!("Fetched {} reports ({} skipped)", reports.len(), total - reports.len());

        Ok(reports)
    }
}

fn extract_documents(json: Value) -> Result<Vec<Value>, ReportsError> {
    match json {
        Value::Array(documents) => Ok(documents),
        Value::Object(mut map) => ["reports", "documents"]
            .iter()
            .find_map(|key| match map.remove(*key) {
                Some(Value::Array(documents)) => Some(documents),
                _ => None,
            })
            .ok_or_else(|| ReportsError::InvalidResponse("Missing reports array".into())),
        _ => Err(ReportsError::InvalidResponse("Expected an array or object".into())),
    }
}
