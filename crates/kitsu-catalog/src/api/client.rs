//! Kitsu API client.
//!
//! One GET per call, no retries. Failures are returned to the caller as
//! [`CatalogError`] values.

use super::error::{CatalogError, Result};
use super::query::Query;
use super::source::CatalogSource;
use super::types::{ErrorDocument, ListDocument, SingleDocument};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use shared::CatalogConfig;
use tracing::{debug, warn};

/// Media type for every request and response
pub const JSON_API: &str = "application/vnd.api+json";

/// Kitsu JSON-API client
#[derive(Debug, Clone)]
pub struct KitsuClient {
    /// HTTP client
    client: Client,
    /// Base URL, without a trailing slash
    base_url: String,
}

impl KitsuClient {
    /// Create a new client from the catalog configuration
    pub fn new(config: &CatalogConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| CatalogError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Self::with_http_client(client, &config.base_url)
    }

    /// Wrap an already configured HTTP client
    pub fn with_http_client(client: Client, base_url: &str) -> Result<Self> {
        Url::parse(base_url)
            .map_err(|e| CatalogError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Full request URL for an endpoint path and query
    pub fn build_url(&self, endpoint: &str, query: &Query) -> Result<Url> {
        let raw = format!("{}{}", self.base_url, endpoint);
        let mut url =
            Url::parse(&raw).map_err(|e| CatalogError::InvalidUrl(format!("{}: {}", raw, e)))?;
        query.apply_to(&mut url);
        Ok(url)
    }

    /// Make a single GET request and decode the JSON-API document
    async fn get<T: DeserializeOwned>(&self, endpoint: &str, query: &Query) -> Result<T> {
        let url = self.build_url(endpoint, query)?;

        debug!(url = %url, "Making API request");

        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, JSON_API)
            .header(CONTENT_TYPE, JSON_API)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "Request error");
                CatalogError::from(e)
            })?;

        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            // The status alone still describes a failed request
            Err(e) if !status.is_success() => {
                warn!(url = %url, status = %status, error = %e, "Failed to read error body");
                Default::default()
            }
            Err(e) => {
                warn!(url = %url, error = %e, "Failed to read response body");
                return Err(e.into());
            }
        };

        if !status.is_success() {
            // Best effort: the server usually explains itself in `errors`
            let message = serde_json::from_slice::<ErrorDocument>(&body)
                .ok()
                .and_then(|doc| doc.first_detail().map(str::to_string))
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                });

            warn!(
                url = %url,
                status = %status,
                error = %message,
                "Request failed"
            );

            return Err(CatalogError::Http { status, message });
        }

        match serde_json::from_slice::<T>(&body) {
            Ok(data) => {
                debug!(url = %url, bytes = body.len(), "Request successful");
                Ok(data)
            }
            Err(e) => {
                warn!(url = %url, error = %e, "Failed to parse response");
                Err(e.into())
            }
        }
    }
}

impl CatalogSource for KitsuClient {
    async fn fetch_list<A: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &Query,
    ) -> Result<ListDocument<A>> {
        self.get(endpoint, query).await
    }

    async fn fetch_one<A: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &Query,
    ) -> Result<SingleDocument<A>> {
        self.get(endpoint, query).await
    }
}
