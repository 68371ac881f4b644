//! Configuration for the statistics connector

use serde::{Deserialize, Serialize};

/// Statistics service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Base URL of the statistics service
    pub base_url: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl StatsConfig {
    /// Create a new config pointing at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms: 30_000,
        }
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Full URL for an endpoint path such as `/search_player`
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self::new("http://localhost:8000")
    }
}
