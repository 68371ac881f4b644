//! Core data types for Courtside

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Prefix shared by every analysis cache key
pub const CACHE_KEY_PREFIX: &str = "player:";

/// Number of recent games fed into an analysis prompt
pub const ANALYSIS_GAME_COUNT: u32 = 5;

/// A validated, user-supplied player name
///
/// The name keeps the caller's casing for display and upstream lookups; only
/// the cache key is case-folded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PlayerName(String);

impl PlayerName {
    /// Validate a raw name, returning `None` when it is absent or blank
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let trimmed = raw?.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key under which the analysis for this player is cached
    pub fn cache_key(&self) -> String {
        format!("{}{}", CACHE_KEY_PREFIX, self.0.to_lowercase())
    }
}

impl std::fmt::Display for PlayerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One game record as returned by the statistics service
///
/// Records are opaque: every upstream column is carried into the prompt
/// untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerGame(pub Value);

/// Recent-games payload from the statistics service
///
/// Only `recent_games` is read; identity fields and any other keys the
/// service adds are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LastGamesResult {
    #[serde(default)]
    pub recent_games: Vec<PlayerGame>,
}

/// Where an analysis came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisSource {
    /// Served from the analysis cache
    Memory,
    /// Freshly generated by the inference model
    Ai,
}

/// Result of an analysis request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerAnalysis {
    /// Player name exactly as the caller supplied it
    pub player: String,
    pub analysis: String,
    pub source: AnalysisSource,
}
