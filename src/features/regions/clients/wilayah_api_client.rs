use async_trait::async_trait;
use serde::Deserialize;

use crate::core::config::RegionApiConfig;
use crate::core::error::{AppError, Result};
use crate::features::regions::models::{RegionLevel, RegionNode};
use crate::shared::constants::HTTP_USER_AGENT;

/// Source of the hierarchical region data. Provinces have no parent;
/// every other level is keyed by its parent's id.
#[async_trait]
pub trait RegionDirectory: Send + Sync {
    async fn provinces(&self) -> Result<Vec<RegionNode>>;

    /// Children of `parent_id` at `level`. `level` must not be
    /// `Province` (provinces have no parent key).
    async fn children(&self, level: RegionLevel, parent_id: &str) -> Result<Vec<RegionNode>>;
}

/// One region entry as served by the wilayah API.
#[derive(Debug, Deserialize)]
struct RegionEntryDto {
    id: String,
    name: String,
}

/// Client for the static-JSON Indonesian region API
/// (`/provinces.json`, `/regencies/{id}.json`, `/districts/{id}.json`,
/// `/villages/{id}.json`).
pub struct WilayahApiClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl WilayahApiClient {
    pub fn new(config: &RegionApiConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(HTTP_USER_AGENT)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.clone(),
        })
    }

    async fn fetch_list(&self, url: &str) -> Result<Vec<RegionNode>> {
        tracing::debug!("Fetching region list: {}", url);

        let response = self.http_client.get(url).send().await.map_err(|e| {
            tracing::error!("Region directory request failed: {:?}", e);
            AppError::ExternalServiceError(format!("Region directory request failed: {}", e))
        })?;

        if !response.status().is_success() {
            tracing::warn!("Region directory returned status: {}", response.status());
            return Err(AppError::ExternalServiceError(format!(
                "Region directory error: HTTP {}",
                response.status()
            )));
        }

        let entries: Vec<RegionEntryDto> = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse region directory response: {:?}", e);
            AppError::ExternalServiceError(format!("Failed to parse region list: {}", e))
        })?;

        Ok(entries
            .into_iter()
            .map(|e| RegionNode::new(e.id, e.name))
            .collect())
    }
}

#[async_trait]
impl RegionDirectory for WilayahApiClient {
    async fn provinces(&self) -> Result<Vec<RegionNode>> {
        let url = format!("{}/provinces.json", self.base_url);
        self.fetch_list(&url).await
    }

    async fn children(&self, level: RegionLevel, parent_id: &str) -> Result<Vec<RegionNode>> {
        let segment = match level {
            RegionLevel::Regency => "regencies",
            RegionLevel::District => "districts",
            RegionLevel::Village => "villages",
            RegionLevel::Province => {
                return Err(AppError::BadRequest(
                    "Provinces have no parent key".to_string(),
                ))
            }
        };
        let url = format!(
            "{}/{}/{}.json",
            self.base_url,
            segment,
            urlencoding::encode(parent_id)
        );
        self.fetch_list(&url).await
    }
}
