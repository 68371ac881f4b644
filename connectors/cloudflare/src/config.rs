//! Configuration for the Cloudflare connectors

use serde::{Deserialize, Serialize};

/// Cloudflare REST API configuration shared by Workers AI and Workers KV
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudflareConfig {
    /// Cloudflare account ID
    pub account_id: String,
    /// API token with Workers AI and/or Workers KV permissions
    pub api_token: String,
    /// API base URL
    pub api_base: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl CloudflareConfig {
    /// Create a new config for the given account and token
    pub fn new(account_id: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            api_token: api_token.into(),
            api_base: "https://api.cloudflare.com/client/v4".to_string(),
            timeout_ms: 60_000,
        }
    }

    /// Set the API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Check that credentials are present
    pub fn validate(&self) -> Result<(), String> {
        if self.account_id.trim().is_empty() {
            return Err("Cloudflare account_id is not set".to_string());
        }
        if self.api_token.trim().is_empty() {
            return Err("Cloudflare api_token is not set".to_string());
        }
        Ok(())
    }

    pub(crate) fn account_url(&self) -> String {
        format!(
            "{}/accounts/{}",
            self.api_base.trim_end_matches('/'),
            self.account_id
        )
    }
}

impl Default for CloudflareConfig {
    fn default() -> Self {
        Self::new("", "") // Credentials must be set by user
    }
}
