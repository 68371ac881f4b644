//! HTTP connector for the NBA statistics service

use async_trait::async_trait;
use courtside_core::prelude::*;
use reqwest::Client;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, error, info};

mod config;

pub use config::StatsConfig;

/// reqwest implementation of StatsClient
pub struct HttpStatsClient {
    client: Client,
    config: StatsConfig,
}

impl HttpStatsClient {
    /// Create a new statistics client
    pub fn new(config: StatsConfig) -> Result<Self, StatsError> {
        if config.base_url.trim().is_empty() {
            return Err(StatsError::ConfigError("Statistics base URL is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| StatsError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &StatsConfig {
        &self.config
    }

    /// GET `path` with `query` and return the JSON body of a successful response
    async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, StatsError> {
        let url = self.config.endpoint_url(path);
        debug!("GET {} {:?}", url, query);
        let start_time = Instant::now();

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| StatsError::NetworkError(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            error!("Statistics API error {} for {}", status, path);
            return Err(StatsError::UpstreamStatus(status.as_u16()));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| StatsError::ResponseParseError(e.to_string()))?;

        info!("GET {} completed in {}ms", path, start_time.elapsed().as_millis());
        Ok(body)
    }
}

#[async_trait]
impl StatsClient for HttpStatsClient {
    async fn search_player(&self, name: &str) -> Result<Value, StatsError> {
        self.get_json("/search_player", &[("name", name)]).await
    }

    async fn last_games(&self, name: &str, num_games: &str) -> Result<Value, StatsError> {
        self.get_json(
            "/player/lastgames_by_name",
            &[("name", name), ("num_games", num_games)],
        )
        .await
    }

    async fn career(&self, name: &str) -> Result<Value, StatsError> {
        self.get_json("/player/career_by_name", &[("name", name)]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> HttpStatsClient {
        HttpStatsClient::new(StatsConfig::new(server.uri())).unwrap()
    }

    #[test]
    fn test_empty_base_url_rejected() {
        let result = HttpStatsClient::new(StatsConfig::new(" "));
        assert!(matches!(result, Err(StatsError::ConfigError(_))));
    }

    #[tokio::test]
    async fn test_search_player_passes_body_through() {
        let server = MockServer::start().await;
        let body = json!([{"id": 2544, "full_name": "LeBron James", "is_active": true}]);
        Mock::given(method("GET"))
            .and(path("/search_player"))
            .and(query_param("name", "LeBron James"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let result = client.search_player("LeBron James").await.unwrap();
        assert_eq!(result, body);
    }

    #[tokio::test]
    async fn test_last_games_forwards_num_games() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/player/lastgames_by_name"))
            .and(query_param("name", "Nikola Jokic"))
            .and(query_param("num_games", "abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "player_name": "Nikola Jokic",
                "player_id": 203999,
                "recent_games": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let result = client.last_games("Nikola Jokic", "abc").await.unwrap();
        assert_eq!(result["player_id"], 203999);
    }

    #[tokio::test]
    async fn test_non_success_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/player/career_by_name"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Player not found"})))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.career("Nobody").await.unwrap_err();
        assert!(matches!(err, StatsError::UpstreamStatus(404)));
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn test_invalid_json_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search_player"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.search_player("x").await.unwrap_err();
        assert!(matches!(err, StatsError::ResponseParseError(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let client = HttpStatsClient::new(StatsConfig::new("http://127.0.0.1:1").with_timeout(500)).unwrap();
        let err = client.search_player("x").await.unwrap_err();
        assert!(matches!(err, StatsError::NetworkError(_)));
    }
}
