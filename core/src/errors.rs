//! Error types for Courtside core operations

use thiserror::Error;

/// Main error type for Courtside core operations
#[derive(Error, Debug)]
pub enum CoreError {
    /// Client supplied a missing or malformed field; the message is shown verbatim
    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Stats(#[from] StatsError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Whether the error was caused by the caller rather than a collaborator
    pub fn is_client_error(&self) -> bool {
        matches!(self, CoreError::InvalidInput(_))
    }
}

/// Errors raised by the statistics service client
#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Statistics API returned {0}")]
    UpstreamStatus(u16),

    #[error("Statistics API request failed: {0}")]
    NetworkError(String),

    #[error("Failed to parse statistics response: {0}")]
    ResponseParseError(String),

    #[error("Statistics client configuration error: {0}")]
    ConfigError(String),
}

/// Errors raised by a cache store
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Cache backend unavailable: {0}")]
    Unavailable(String),

    #[error("Cache backend returned {0}")]
    BackendStatus(u16),

    #[error("Cache configuration error: {0}")]
    ConfigError(String),
}

/// Errors raised by an inference client
#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("Inference configuration error: {0}")]
    ConfigError(String),

    #[error("Inference request failed: {0}")]
    NetworkError(String),

    #[error("Inference API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse inference response: {0}")]
    ResponseParseError(String),
}

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Result type alias for statistics operations
pub type StatsResult<T> = Result<T, StatsError>;

/// Result type alias for cache operations
pub type CacheResult<T> = Result<T, CacheError>;

/// Result type alias for inference operations
pub type InferenceResult<T> = Result<T, InferenceError>;
