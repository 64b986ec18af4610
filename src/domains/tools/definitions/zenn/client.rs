//! HTTP client for the Zenn listing API.
//!
//! A fresh `reqwest::Client` is built for every call and dropped when the
//! call returns, on success and on error alike. No retries, no caching.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::common::{QueryParams, ResourcePath};
use crate::core::config::ZennConfig;
use crate::domains::tools::FetchError;

/// Source of listing data, keyed by upstream resource.
#[async_trait]
pub trait ListingFetcher: Send + Sync {
    /// GET `resource` with `params` and return the decoded JSON body.
    async fn fetch(
        &self,
        resource: ResourcePath,
        params: &QueryParams,
    ) -> Result<Value, FetchError>;
}

/// Fetcher backed by the real Zenn HTTP API.
#[derive(Debug, Clone)]
pub struct ZennClient {
    base_url: String,
    user_agent: String,
}

impl ZennClient {
    /// Public API root.
    pub const DEFAULT_BASE_URL: &'static str = "https://zenn.dev/api/";

    pub fn new(config: &ZennConfig) -> Self {
        Self {
            base_url: normalize_base_url(&config.base_url),
            user_agent: config.user_agent.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}{resource}` without a query string.
    pub fn endpoint(&self, resource: ResourcePath) -> String {
        format!("{}{}", self.base_url, resource.as_str())
    }
}

#[async_trait]
impl ListingFetcher for ZennClient {
    #[instrument(skip_all, fields(resource = %resource))]
    async fn fetch(
        &self,
        resource: ResourcePath,
        params: &QueryParams,
    ) -> Result<Value, FetchError> {
        let endpoint = self.endpoint(resource);
        debug!("GET {} {:?}", endpoint, params);

        let client = reqwest::Client::builder()
            .user_agent(&self.user_agent)
            .build()
            .map_err(|source| FetchError::Request {
                url: endpoint.clone(),
                source,
            })?;

        // Parameters are encoded in their given order.
        let response = client
            .get(&endpoint)
            .query(params)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: endpoint.clone(),
                source,
            })?;

        let url = response.url().to_string();
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Upstream returned {} for {}", status, url);
            return Err(FetchError::http_status(status.as_u16(), url, &body));
        }

        response
            .json::<Value>()
            .await
            .map_err(|source| FetchError::Decode { url, source })
    }
}

/// Guarantee exactly one trailing slash so segments can be appended.
fn normalize_base_url(base_url: &str) -> String {
    format!("{}/", base_url.trim().trim_end_matches('/'))
}
