//! In-memory implementation of CacheStore for testing and development

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use courtside_core::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Configuration for in-memory cache
#[derive(Debug, Clone)]
pub struct InMemoryConfig {
    /// Maximum number of entries to keep; the oldest entry is evicted first
    pub max_entries: Option<usize>,
    /// Lifetime of an entry; `None` keeps entries until evicted
    pub ttl: Option<Duration>,
    /// Whether to enable verbose logging
    pub verbose: bool,
}

impl Default for InMemoryConfig {
    fn default() -> Self {
        Self {
            max_entries: Some(10_000),
            ttl: None,
            verbose: false,
        }
    }
}

/// Internal storage for a cached value
#[derive(Debug, Clone)]
struct StoredEntry {
    value: String,
    stored_at: DateTime<Utc>,
}

impl StoredEntry {
    fn is_expired(&self, ttl: Option<Duration>, now: DateTime<Utc>) -> bool {
        ttl.map_or(false, |ttl| now - self.stored_at >= ttl)
    }
}

/// In-memory CacheStore implementation
pub struct InMemoryCache {
    entries: Arc<RwLock<HashMap<String, StoredEntry>>>,
    config: InMemoryConfig,
}

impl InMemoryCache {
    /// Create a new in-memory cache
    pub fn new() -> Self {
        Self::new_with_config(InMemoryConfig::default())
    }

    /// Create a new in-memory cache with configuration
    pub fn new_with_config(config: InMemoryConfig) -> Self {
        info!("Creating in-memory cache with config: {:?}", config);
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            config,
        }
    }

    /// Number of entries currently held, expired ones included
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Clear all entries
    pub async fn clear(&self) {
        self.entries.write().await.clear();
        info!("Cleared in-memory cache");
    }

    fn make_room(&self, entries: &mut HashMap<String, StoredEntry>, now: DateTime<Utc>) {
        if let Some(ttl) = self.config.ttl {
            entries.retain(|_, entry| !entry.is_expired(Some(ttl), now));
        }

        let Some(max_entries) = self.config.max_entries else {
            return;
        };

        while !entries.is_empty() && entries.len() >= max_entries {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.stored_at)
                .map(|(key, _)| key.clone());
            match oldest {
                Some(key) => {
                    if self.config.verbose {
                        debug!("Evicting {} from in-memory cache", key);
                    }
                    entries.remove(&key);
                }
                None => break,
            }
        }
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for InMemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let now = Utc::now();
        let entries = self.entries.read().await;

        let value = entries
            .get(key)
            .filter(|entry| !entry.is_expired(self.config.ttl, now))
            .map(|entry| entry.value.clone());

        if self.config.verbose {
            debug!("In-memory cache get {}: hit={}", key, value.is_some());
        }

        Ok(value)
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let now = Utc::now();
        let mut entries = self.entries.write().await;

        if !entries.contains_key(key) {
            self.make_room(&mut entries, now);
        }

        if self.config.max_entries == Some(0) {
            return Ok(());
        }

        entries.insert(
            key.to_string(),
            StoredEntry {
                value: value.to_string(),
                stored_at: now,
            },
        );

        if self.config.verbose {
            debug!("In-memory cache put {} ({} entries)", key, entries.len());
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
