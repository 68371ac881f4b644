//! Cloudflare API data models

use serde::Deserialize;

/// Envelope wrapped around most Cloudflare v4 API responses
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<ApiMessage>,
}

/// Error or informational message inside an envelope
#[derive(Debug, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub code: i64,
    pub message: String,
}

impl ApiEnvelope {
    /// Human-readable summary of the envelope errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return "Unknown error".to_string();
        }
        self.errors
            .iter()
            .map(|e| format!("{} ({})", e.message, e.code))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Best-effort description of an error body
pub fn describe_error_body(body: &str) -> String {
    match serde_json::from_str::<ApiEnvelope>(body) {
        Ok(envelope) if !envelope.errors.is_empty() => envelope.error_summary(),
        _ if body.trim().is_empty() => "Unknown error".to_string(),
        _ => body.to_string(),
    }
}
