//! Configuration management for the Courtside server

use crate::cli::Cli;
use courtside_connector_cloudflare::CloudflareConfig;
use courtside_connector_stats::StatsConfig;
use courtside_core::{AnalystConfig, CoreError};
use courtside_http::HttpServerConfig;
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Environment variable prefix; nested keys are separated by `__`
pub const ENV_PREFIX: &str = "COURTSIDE_";

/// Complete server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CourtsideConfig {
    pub server: ServerSection,
    pub stats: StatsConfig,
    pub inference: InferenceSection,
    pub cache: CacheSection,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub bind_address: SocketAddr,
    pub enable_cors: bool,
    /// HTML document served on `/`
    pub root_html: Option<PathBuf>,
}

impl Default for ServerSection {
    fn default() -> Self {
        let http = HttpServerConfig::default();
        Self {
            bind_address: http.bind_address,
            enable_cors: http.enable_cors,
            root_html: None,
        }
    }
}

/// Workers AI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceSection {
    pub account_id: String,
    pub api_token: String,
    pub api_base: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout_ms: u64,
}

impl Default for InferenceSection {
    fn default() -> Self {
        let cloudflare = CloudflareConfig::default();
        let analyst = AnalystConfig::default();
        Self {
            account_id: cloudflare.account_id,
            api_token: cloudflare.api_token,
            api_base: cloudflare.api_base,
            model: analyst.model,
            max_tokens: analyst.max_tokens,
            timeout_ms: cloudflare.timeout_ms,
        }
    }
}

/// Which cache store holds generated analyses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheBackend {
    Memory,
    WorkersKv,
}

/// Analysis cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSection {
    pub backend: CacheBackend,
    /// Workers KV namespace, required for the `workers_kv` backend
    pub namespace_id: Option<String>,
    /// Entry lifetime; entries never expire when unset
    pub ttl_secs: Option<u64>,
    /// Capacity of the in-memory backend
    pub max_entries: usize,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Memory,
            namespace_id: None,
            ttl_secs: None,
            max_entries: 10_000,
        }
    }
}

impl CourtsideConfig {
    /// Load configuration from defaults, file and environment
    pub fn load(config_path: &Option<PathBuf>) -> Result<Self, CoreError> {
        let mut figment = Figment::from(Serialized::defaults(CourtsideConfig::default()));

        // Load from default config file if it exists
        let default_config_paths = ["courtside.yaml", "courtside.yml"];

        for path in &default_config_paths {
            if Path::new(path).exists() {
                figment = figment.merge(Yaml::file(path));
                break;
            }
        }

        // Load from specified config file
        if let Some(path) = config_path {
            if path.exists() {
                figment = figment.merge(Yaml::file(path));
            } else {
                return Err(CoreError::Configuration(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment
            .extract()
            .map_err(|e| CoreError::Configuration(format!("Failed to parse configuration: {}", e)))
    }

    /// Apply CLI argument overrides to the configuration
    pub fn with_overrides(mut self, args: &Cli) -> Self {
        if let Some(bind) = args.bind {
            self.server.bind_address = bind;
        }

        if let Some(ref stats_url) = args.stats_url {
            self.stats.base_url = stats_url.clone();
        }

        self
    }

    pub fn http(&self) -> HttpServerConfig {
        HttpServerConfig {
            bind_address: self.server.bind_address,
            enable_cors: self.server.enable_cors,
        }
    }

    pub fn cloudflare(&self) -> CloudflareConfig {
        CloudflareConfig::new(&self.inference.account_id, &self.inference.api_token)
            .with_api_base(&self.inference.api_base)
            .with_timeout(self.inference.timeout_ms)
    }

    pub fn analyst(&self) -> AnalystConfig {
        AnalystConfig {
            model: self.inference.model.clone(),
            max_tokens: self.inference.max_tokens,
        }
    }
}
