//! Workers AI inference client

use crate::config::CloudflareConfig;
use crate::models::{describe_error_body, ApiEnvelope};
use async_trait::async_trait;
use courtside_core::prelude::*;
use reqwest::Client;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, error, info};

/// Workers AI implementation of InferenceClient
///
/// Calls `POST /accounts/{account_id}/ai/run/{model}` and returns the raw
/// response so the core can locate the generated text.
pub struct WorkersAiClient {
    client: Client,
    config: CloudflareConfig,
}

impl WorkersAiClient {
    /// Create a new Workers AI client
    pub fn new(config: CloudflareConfig) -> Result<Self, InferenceError> {
        config.validate().map_err(InferenceError::ConfigError)?;

        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| InferenceError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn run_url(&self, model: &str) -> String {
        format!("{}/ai/run/{}", self.config.account_url(), model.trim_start_matches('/'))
    }
}

#[async_trait]
impl InferenceClient for WorkersAiClient {
    async fn run(&self, model: &str, input: InferenceInput) -> Result<Value, InferenceError> {
        debug!("Running Workers AI model {} (max_tokens={})", model, input.max_tokens);
        let start_time = Instant::now();

        let response = self
            .client
            .post(self.run_url(model))
            .bearer_auth(&self.config.api_token)
            .json(&input)
            .send()
            .await
            .map_err(|e| InferenceError::NetworkError(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = describe_error_body(&error_text);
            error!("Workers AI error {}: {}", status, message);
            return Err(InferenceError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| InferenceError::ResponseParseError(format!("Failed to parse response: {}", e)))?;

        if body.get("success").and_then(Value::as_bool) == Some(false) {
            let envelope: ApiEnvelope = serde_json::from_value(body)
                .map_err(|e| InferenceError::ResponseParseError(e.to_string()))?;
            return Err(InferenceError::ApiError {
                status: status.as_u16(),
                message: envelope.error_summary(),
            });
        }

        info!(
            "Workers AI model {} finished in {}ms",
            model,
            start_time.elapsed().as_millis()
        );

        Ok(body)
    }
}
