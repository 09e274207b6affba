use async_trait::async_trait;
use serde::Deserialize;

use crate::core::error::{AppError, Result};
use crate::features::postal_codes::models::PostalCodeRecord;
use crate::shared::constants::HTTP_USER_AGENT;

/// Free-text postal-code search. Both the primary and the fallback
/// service implement this; tests substitute in-memory fakes.
#[async_trait]
pub trait PostalCodeSearch: Send + Sync {
    /// Ranked results for `query`; an empty vec means no hits.
    async fn search(&self, query: &str) -> Result<Vec<PostalCodeRecord>>;
}

/// Envelope both kodepos services wrap their results in.
#[derive(Debug, Deserialize)]
struct KodeposResponse {
    #[serde(default)]
    data: Vec<PostalCodeRecord>,
}

/// Error envelope the services return on non-success statuses.
#[derive(Debug, Deserialize)]
struct KodeposErrorResponse {
    #[serde(default)]
    message: String,
}

/// Client for a kodepos search endpoint (`GET {base}/search/?q=<query>`).
/// The primary and fallback services share this request/response shape,
/// so one client type serves both, instantiated per base URL.
pub struct KodeposClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl KodeposClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(HTTP_USER_AGENT)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl PostalCodeSearch for KodeposClient {
    async fn search(&self, query: &str) -> Result<Vec<PostalCodeRecord>> {
        let url = format!("{}/search/?q={}", self.base_url, urlencoding::encode(query));
        tracing::debug!("Postal code search: {} -> {}", query, url);

        let response = self.http_client.get(&url).send().await.map_err(|e| {
            tracing::error!("Postal search request failed: {:?}", e);
            AppError::ExternalServiceError(format!("Postal search request failed: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<KodeposErrorResponse>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            tracing::warn!("Postal search error: HTTP {} - {}", status, detail);
            return Err(AppError::ExternalServiceError(format!(
                "Postal search error: HTTP {}",
                status
            )));
        }

        let body: KodeposResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse postal search response: {:?}", e);
            AppError::ExternalServiceError(format!("Failed to parse postal search response: {}", e))
        })?;

        Ok(body.data)
    }
}
