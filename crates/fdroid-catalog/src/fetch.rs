//! Index document retrieval.

use std::time::Duration;

use reqwest::header::ACCEPT;

use crate::config::CatalogConfig;
use crate::error::FetchError;
use crate::index::RawIndexDocument;

/// HTTP client for the upstream index.
///
/// One GET per [`fetch`](Self::fetch) call, no retries.
#[derive(Clone)]
pub struct IndexFetcher {
    client: reqwest::Client,
}

impl IndexFetcher {
    /// Create a fetcher with the given request timeout and `User-Agent`.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| FetchError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    pub fn from_config(config: &CatalogConfig) -> Result<Self, FetchError> {
        Self::new(config.timeout(), &config.user_agent)
    }

    /// Create a fetcher with a custom client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Download and decode the index document at `url`.
    pub async fn fetch(&self, url: &str) -> Result<RawIndexDocument, FetchError> {
        tracing::info!(url, "Downloading index");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.bytes().await?;
        tracing::info!(bytes = body.len(), "Index downloaded");

        let document: RawIndexDocument = serde_json::from_slice(&body)?;
        tracing::debug!(packages = document.package_count(), "Index decoded");
        Ok(document)
    }
}
