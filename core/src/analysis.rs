//! Cache-first player analysis orchestration

use crate::errors::{CoreError, CoreResult};
use crate::extract::extract_generated_text;
use crate::prompt::build_analysis_prompt;
use crate::traits::{CacheStore, InferenceClient, InferenceInput, StatsClient};
use crate::types::{AnalysisSource, LastGamesResult, PlayerAnalysis, PlayerName, ANALYSIS_GAME_COUNT};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Message returned when an analysis request has no usable name
pub const MISSING_PLAYER_NAME: &str = "Missing player name";

/// Settings for the inference step of an analysis
#[derive(Debug, Clone)]
pub struct AnalystConfig {
    /// Model identifier handed to the inference client
    pub model: String,
    /// Upper bound on generated tokens
    pub max_tokens: u32,
}

impl Default for AnalystConfig {
    fn default() -> Self {
        Self {
            model: "@cf/meta/llama-3-8b-instruct".to_string(),
            max_tokens: 300,
        }
    }
}

/// Produces player analyses, consulting the cache before any upstream call
///
/// Holds no mutable state of its own, so one instance serves all requests.
/// Concurrent misses for the same player are not coalesced; each computes and
/// writes its own result.
pub struct PlayerAnalyst {
    stats: Arc<dyn StatsClient>,
    cache: Arc<dyn CacheStore>,
    inference: Arc<dyn InferenceClient>,
    config: AnalystConfig,
}

impl PlayerAnalyst {
    pub fn new(
        stats: Arc<dyn StatsClient>,
        cache: Arc<dyn CacheStore>,
        inference: Arc<dyn InferenceClient>,
        config: AnalystConfig,
    ) -> Self {
        Self {
            stats,
            cache,
            inference,
            config,
        }
    }

    pub fn config(&self) -> &AnalystConfig {
        &self.config
    }

    /// Analyze the player named `raw_name`
    ///
    /// Returns `CoreError::InvalidInput` before touching any collaborator when
    /// the name is absent or blank. A cache hit returns immediately. On a miss
    /// the cache is written only after inference succeeds, and a failed write
    /// does not fail the request.
    pub async fn analyze(&self, raw_name: Option<&str>) -> CoreResult<PlayerAnalysis> {
        let name = PlayerName::parse(raw_name)
            .ok_or_else(|| CoreError::InvalidInput(MISSING_PLAYER_NAME.to_string()))?;
        let display_name = raw_name.unwrap_or_default().to_string();
        let key = name.cache_key();

        if let Some(cached) = self.cache.get(&key).await? {
            debug!("Cache hit for {} in {}", key, self.cache.name());
            return Ok(PlayerAnalysis {
                player: display_name,
                analysis: cached,
                source: AnalysisSource::Memory,
            });
        }

        debug!("Cache miss for {}, fetching recent games", key);
        let start_time = Instant::now();

        let games = self.fetch_recent_games(&name).await?;
        let prompt = build_analysis_prompt(&name, &games.recent_games)?;

        let response = self
            .inference
            .run(
                &self.config.model,
                InferenceInput {
                    prompt,
                    max_tokens: self.config.max_tokens,
                },
            )
            .await?;
        let analysis = extract_generated_text(&response);

        if let Err(e) = self.cache.put(&key, &analysis).await {
            warn!("Failed to cache analysis for {}: {}", key, e);
        }

        info!(
            "Generated analysis for {} from {} games in {}ms",
            name,
            games.recent_games.len(),
            start_time.elapsed().as_millis()
        );

        Ok(PlayerAnalysis {
            player: display_name,
            analysis,
            source: AnalysisSource::Ai,
        })
    }

    async fn fetch_recent_games(&self, name: &PlayerName) -> CoreResult<LastGamesResult> {
        let body = self
            .stats
            .last_games(name.as_str(), &ANALYSIS_GAME_COUNT.to_string())
            .await?;
        let games: LastGamesResult = serde_json::from_value(body)?;
        debug!("Fetched {} recent games for {}", games.recent_games.len(), name);
        Ok(games)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{CacheError, InferenceError, StatsError};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeStats {
        fail_with: Option<u16>,
        body: Option<Value>,
        calls: AtomicUsize,
        last_args: Mutex<Option<(String, String)>>,
    }

    #[async_trait]
    impl StatsClient for FakeStats {
        async fn search_player(&self, _name: &str) -> Result<Value, StatsError> {
            unreachable!("analysis never searches")
        }

        async fn last_games(&self, name: &str, num_games: &str) -> Result<Value, StatsError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_args.lock().unwrap() = Some((name.to_string(), num_games.to_string()));
            if let Some(status) = self.fail_with {
                return Err(StatsError::UpstreamStatus(status));
            }
            if let Some(body) = &self.body {
                return Ok(body.clone());
            }
            Ok(json!({
                "player_name": name,
                "player_id": 203999,
                "recent_games": [
                    {"game_date": "2025-04-11", "pts": 30, "reb": 10, "ast": 8},
                    {"game_date": "2025-04-09", "pts": 26, "reb": 14, "ast": 11}
                ]
            }))
        }

        async fn career(&self, _name: &str) -> Result<Value, StatsError> {
            unreachable!("analysis never reads careers")
        }
    }

    #[derive(Default)]
    struct FakeCache {
        entries: Mutex<HashMap<String, String>>,
        puts: AtomicUsize,
        fail_puts: bool,
        fail_gets: bool,
    }

    #[async_trait]
    impl CacheStore for FakeCache {
        async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
            if self.fail_gets {
                return Err(CacheError::Unavailable("down".to_string()));
            }
            Ok(self.entries.lock().unwrap().get(key).cloned())
        }

        async fn put(&self, key: &str, value: &str) -> Result<(), CacheError> {
            self.puts.fetch_add(1, Ordering::SeqCst);
            if self.fail_puts {
                return Err(CacheError::Unavailable("read-only".to_string()));
            }
            self.entries.lock().unwrap().insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn name(&self) -> &'static str {
            "fake"
        }
    }

    struct FakeInference {
        reply: Result<Value, u16>,
        calls: AtomicUsize,
        last_input: Mutex<Option<(String, InferenceInput)>>,
    }

    impl FakeInference {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(json!({"response": text})),
                calls: AtomicUsize::new(0),
                last_input: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl InferenceClient for FakeInference {
        async fn run(&self, model: &str, input: InferenceInput) -> Result<Value, InferenceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_input.lock().unwrap() = Some((model.to_string(), input));
            match &self.reply {
                Ok(value) => Ok(value.clone()),
                Err(status) => Err(InferenceError::ApiError {
                    status: *status,
                    message: "model overloaded".to_string(),
                }),
            }
        }
    }

    fn analyst(
        stats: &Arc<FakeStats>,
        cache: &Arc<FakeCache>,
        inference: &Arc<FakeInference>,
    ) -> PlayerAnalyst {
        PlayerAnalyst::new(
            stats.clone(),
            cache.clone(),
            inference.clone(),
            AnalystConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_miss_then_hit() {
        let stats = Arc::new(FakeStats::default());
        let cache = Arc::new(FakeCache::default());
        let inference = Arc::new(FakeInference::replying("Jokic averaged 28 points..."));
        let analyst = analyst(&stats, &cache, &inference);

        let first = analyst.analyze(Some("Nikola Jokic")).await.unwrap();
        assert_eq!(first.player, "Nikola Jokic");
        assert_eq!(first.analysis, "Jokic averaged 28 points...");
        assert_eq!(first.source, AnalysisSource::Ai);
        assert_eq!(
            cache.entries.lock().unwrap().get("player:nikola jokic").map(String::as_str),
            Some("Jokic averaged 28 points...")
        );

        let second = analyst.analyze(Some("Nikola Jokic")).await.unwrap();
        assert_eq!(second.analysis, first.analysis);
        assert_eq!(second.source, AnalysisSource::Memory);

        assert_eq!(stats.calls.load(Ordering::SeqCst), 1);
        assert_eq!(inference.calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.puts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_hit_is_case_insensitive() {
        let stats = Arc::new(FakeStats::default());
        let cache = Arc::new(FakeCache::default());
        cache
            .entries
            .lock()
            .unwrap()
            .insert("player:lebron james".to_string(), "Still elite".to_string());
        let inference = Arc::new(FakeInference::replying("unused"));
        let analyst = analyst(&stats, &cache, &inference);

        let result = analyst.analyze(Some("LeBron James")).await.unwrap();
        assert_eq!(result.player, "LeBron James");
        assert_eq!(result.analysis, "Still elite");
        assert_eq!(result.source, AnalysisSource::Memory);
        assert_eq!(stats.calls.load(Ordering::SeqCst), 0);
        assert_eq!(inference.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_name_makes_no_calls() {
        let stats = Arc::new(FakeStats::default());
        let cache = Arc::new(FakeCache {
            fail_gets: true,
            ..Default::default()
        });
        let inference = Arc::new(FakeInference::replying("unused"));
        let analyst = analyst(&stats, &cache, &inference);

        for raw in [None, Some(""), Some("  ")] {
            let err = analyst.analyze(raw).await.unwrap_err();
            assert!(err.is_client_error());
            assert_eq!(err.to_string(), MISSING_PLAYER_NAME);
        }
        assert_eq!(stats.calls.load(Ordering::SeqCst), 0);
        assert_eq!(inference.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_stats_failure_skips_inference_and_cache() {
        let stats = Arc::new(FakeStats {
            fail_with: Some(502),
            ..Default::default()
        });
        let cache = Arc::new(FakeCache::default());
        let inference = Arc::new(FakeInference::replying("unused"));
        let analyst = analyst(&stats, &cache, &inference);

        let err = analyst.analyze(Some("Nikola Jokic")).await.unwrap_err();
        assert!(matches!(err, CoreError::Stats(StatsError::UpstreamStatus(502))));
        assert_eq!(inference.calls.load(Ordering::SeqCst), 0);
        assert_eq!(cache.puts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_inference_failure_skips_cache() {
        let stats = Arc::new(FakeStats::default());
        let cache = Arc::new(FakeCache::default());
        let inference = Arc::new(FakeInference {
            reply: Err(503),
            calls: AtomicUsize::new(0),
            last_input: Mutex::new(None),
        });
        let analyst = analyst(&stats, &cache, &inference);

        let err = analyst.analyze(Some("Nikola Jokic")).await.unwrap_err();
        assert!(matches!(err, CoreError::Inference(_)));
        assert_eq!(cache.puts.load(Ordering::SeqCst), 0);
        assert!(cache.entries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cache_write_failure_is_not_fatal() {
        let stats = Arc::new(FakeStats::default());
        let cache = Arc::new(FakeCache {
            fail_puts: true,
            ..Default::default()
        });
        let inference = Arc::new(FakeInference::replying("Good week"));
        let analyst = analyst(&stats, &cache, &inference);

        let result = analyst.analyze(Some("Nikola Jokic")).await.unwrap();
        assert_eq!(result.analysis, "Good week");
        assert_eq!(result.source, AnalysisSource::Ai);
        assert_eq!(cache.puts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cache_read_failure_is_fatal() {
        let stats = Arc::new(FakeStats::default());
        let cache = Arc::new(FakeCache {
            fail_gets: true,
            ..Default::default()
        });
        let inference = Arc::new(FakeInference::replying("unused"));
        let analyst = analyst(&stats, &cache, &inference);

        let err = analyst.analyze(Some("Nikola Jokic")).await.unwrap_err();
        assert!(matches!(err, CoreError::Cache(_)));
        assert_eq!(stats.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_upstream_call_and_inference_input() {
        let stats = Arc::new(FakeStats::default());
        let cache = Arc::new(FakeCache::default());
        let inference = Arc::new(FakeInference::replying("ok"));
        let analyst = analyst(&stats, &cache, &inference);

        analyst.analyze(Some(" Nikola Jokic ")).await.unwrap();

        let (name, num_games) = stats.last_args.lock().unwrap().clone().unwrap();
        assert_eq!(name, "Nikola Jokic");
        assert_eq!(num_games, "5");

        let (model, input) = inference.last_input.lock().unwrap().clone().unwrap();
        assert_eq!(model, "@cf/meta/llama-3-8b-instruct");
        assert_eq!(input.max_tokens, 300);
        assert!(input.prompt.contains("Player: Nikola Jokic"));
        assert!(input.prompt.contains("\"pts\": 30"));
    }

    #[tokio::test]
    async fn test_games_payload_without_identity_fields() {
        let stats = Arc::new(FakeStats {
            body: Some(json!({"player_name": "Nikola Jokic", "recent_games": [{"pts": 30}]})),
            ..Default::default()
        });
        let cache = Arc::new(FakeCache::default());
        let inference = Arc::new(FakeInference::replying("Scored 30"));
        let analyst = analyst(&stats, &cache, &inference);

        let result = analyst.analyze(Some("Nikola Jokic")).await.unwrap();
        assert_eq!(result.analysis, "Scored 30");
        assert_eq!(result.source, AnalysisSource::Ai);

        let (_, input) = inference.last_input.lock().unwrap().clone().unwrap();
        assert!(input.prompt.contains("\"pts\": 30"));
    }
}
