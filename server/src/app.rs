//! Wiring of connectors, cache and analyst into the HTTP state

use crate::config::{CacheBackend, CourtsideConfig};
use courtside_adapter_in_memory::{InMemoryCache, InMemoryConfig};
use courtside_connector_cloudflare::{WorkersAiClient, WorkersKvStore};
use courtside_connector_stats::HttpStatsClient;
use courtside_core::prelude::*;
use courtside_http::AppState;
use std::sync::Arc;
use tracing::info;

fn memory_ttl(secs: u64) -> Result<chrono::Duration, CoreError> {
    i64::try_from(secs)
        .ok()
        .and_then(chrono::Duration::try_seconds)
        .ok_or_else(|| CoreError::Configuration(format!("cache.ttl_secs {} is out of range", secs)))
}

/// Build the cache store selected by the configuration
pub fn build_cache(config: &CourtsideConfig) -> Result<Arc<dyn CacheStore>, CoreError> {
    let cache: Arc<dyn CacheStore> = match config.cache.backend {
        CacheBackend::Memory => {
            let ttl = config.cache.ttl_secs.map(memory_ttl).transpose()?;
            Arc::new(InMemoryCache::new_with_config(InMemoryConfig {
                max_entries: Some(config.cache.max_entries),
                ttl,
                verbose: false,
            }))
        }
        CacheBackend::WorkersKv => {
            let namespace_id = config.cache.namespace_id.clone().ok_or_else(|| {
                CoreError::Configuration("cache.namespace_id is required for workers_kv".to_string())
            })?;
            let mut store = WorkersKvStore::new(config.cloudflare(), namespace_id)?;
            if let Some(ttl) = config.cache.ttl_secs {
                store = store.with_expiration_ttl(ttl);
            }
            Arc::new(store)
        }
    };

    info!("Using {} analysis cache", cache.name());
    Ok(cache)
}

/// Build the shared application state
pub fn build_state(config: &CourtsideConfig) -> Result<AppState, CoreError> {
    let stats: Arc<dyn StatsClient> = Arc::new(HttpStatsClient::new(config.stats.clone())?);
    let inference: Arc<dyn InferenceClient> = Arc::new(WorkersAiClient::new(config.cloudflare())?);
    let cache = build_cache(config)?;

    let analyst = Arc::new(PlayerAnalyst::new(
        stats.clone(),
        cache,
        inference,
        config.analyst(),
    ));

    let mut state = AppState::new(stats, analyst);

    if let Some(ref path) = config.server.root_html {
        let html = std::fs::read_to_string(path).map_err(|e| {
            CoreError::Configuration(format!("Failed to read {}: {}", path.display(), e))
        })?;
        info!("Serving {} on /", path.display());
        state = state.with_root_html(html);
    }

    info!(
        "Statistics at {}, inference model {}",
        config.stats.base_url, config.inference.model
    );
    Ok(state)
}
