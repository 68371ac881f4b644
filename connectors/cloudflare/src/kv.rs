//! Workers KV cache store

use crate::config::CloudflareConfig;
use crate::models::describe_error_body;
use async_trait::async_trait;
use courtside_core::prelude::*;
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, error};

/// Smallest TTL Workers KV accepts, in seconds
pub const MIN_EXPIRATION_TTL: u64 = 60;

/// Workers KV implementation of CacheStore
pub struct WorkersKvStore {
    client: Client,
    config: CloudflareConfig,
    namespace_id: String,
    expiration_ttl: Option<u64>,
}

impl WorkersKvStore {
    /// Create a store backed by the KV namespace `namespace_id`
    pub fn new(config: CloudflareConfig, namespace_id: impl Into<String>) -> Result<Self, CacheError> {
        config.validate().map_err(CacheError::ConfigError)?;

        let namespace_id = namespace_id.into();
        if namespace_id.trim().is_empty() {
            return Err(CacheError::ConfigError("KV namespace_id is not set".to_string()));
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| CacheError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config,
            namespace_id,
            expiration_ttl: None,
        })
    }

    /// Expire written entries after `ttl_secs`, raised to the KV minimum
    pub fn with_expiration_ttl(mut self, ttl_secs: u64) -> Self {
        self.expiration_ttl = Some(ttl_secs.max(MIN_EXPIRATION_TTL));
        self
    }

    /// URL of a single value; the key is percent-encoded as one path segment
    fn value_url(&self, key: &str) -> Result<Url, CacheError> {
        let mut url = Url::parse(&self.config.account_url())
            .map_err(|e| CacheError::ConfigError(format!("Invalid API base: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| CacheError::ConfigError("API base cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(["storage", "kv", "namespaces", self.namespace_id.as_str(), "values", key]);
        Ok(url)
    }
}

#[async_trait]
impl CacheStore for WorkersKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let response = self
            .client
            .get(self.value_url(key)?)
            .bearer_auth(&self.config.api_token)
            .send()
            .await
            .map_err(|e| CacheError::Unavailable(format!("HTTP request failed: {}", e)))?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                debug!("KV miss for {}", key);
                Ok(None)
            }
            status if status.is_success() => {
                let value = response
                    .text()
                    .await
                    .map_err(|e| CacheError::Unavailable(format!("Failed to read value: {}", e)))?;
                debug!("KV hit for {}", key);
                Ok(Some(value))
            }
            status => {
                let error_text = response.text().await.unwrap_or_default();
                error!("Workers KV get error {}: {}", status, describe_error_body(&error_text));
                Err(CacheError::BackendStatus(status.as_u16()))
            }
        }
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let mut request = self
            .client
            .put(self.value_url(key)?)
            .bearer_auth(&self.config.api_token)
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(value.to_string());

        if let Some(ttl) = self.expiration_ttl {
            request = request.query(&[("expiration_ttl", ttl)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| CacheError::Unavailable(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Workers KV put error {}: {}", status, describe_error_body(&error_text));
            return Err(CacheError::BackendStatus(status.as_u16()));
        }

        debug!("KV stored {}", key);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "workers_kv"
    }
}
