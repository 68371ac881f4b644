//! # Courtside Core
//!
//! Core types, collaborator traits and the cache-first analysis orchestrator
//! for Courtside. Adapters and connectors implement the traits defined here;
//! the presentation layer drives [`PlayerAnalyst`] and the [`StatsClient`].

pub mod analysis;
pub mod errors;
pub mod extract;
pub mod prompt;
pub mod traits;
pub mod types;

// Re-export commonly used types and traits
pub use analysis::{AnalystConfig, PlayerAnalyst, MISSING_PLAYER_NAME};
pub use errors::{CacheError, CoreError, InferenceError, StatsError};
pub use traits::{CacheStore, InferenceClient, InferenceInput, StatsClient};
pub use types::{AnalysisSource, LastGamesResult, PlayerAnalysis, PlayerGame, PlayerName};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::analysis::*;
    pub use crate::errors::*;
    pub use crate::traits::*;
    pub use crate::types::*;
    pub use async_trait::async_trait;
}
