//! Collaborator interfaces the core depends on

use crate::errors::{CacheError, InferenceError, StatsError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Client for the upstream NBA statistics service
///
/// Every operation returns the upstream JSON body untouched so that the HTTP
/// layer can pass it through verbatim.
#[async_trait]
pub trait StatsClient: Send + Sync {
    /// Search players whose full name matches `name`
    async fn search_player(&self, name: &str) -> Result<Value, StatsError>;

    /// Most recent games for the first player matching `name`
    ///
    /// `num_games` is forwarded as given; validating it is the upstream's job.
    async fn last_games(&self, name: &str, num_games: &str) -> Result<Value, StatsError>;

    /// Regular-season career totals for the first player matching `name`
    async fn career(&self, name: &str) -> Result<Value, StatsError>;
}

/// Key-value store holding generated analyses
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Look up a value; `Ok(None)` means absent
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store a value, replacing any previous one
    async fn put(&self, key: &str, value: &str) -> Result<(), CacheError>;

    /// Backend name for logs
    fn name(&self) -> &'static str;
}

/// Input for a single inference call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceInput {
    pub prompt: String,
    pub max_tokens: u32,
}

/// Invoker for a text-generation model
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Run `model` on `input` and return the raw response object
    async fn run(&self, model: &str, input: InferenceInput) -> Result<Value, InferenceError>;
}
