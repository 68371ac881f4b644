//! HTTP presentation layer for Courtside
//!
//! Exposes player search, recent games, career totals and cached AI analyses
//! over a small JSON API. Paths are matched exactly; anything unmatched,
//! including a known path with the wrong method, answers 404 in the uniform
//! `{"error": ...}` shape.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use courtside_core::prelude::*;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};

mod handlers;
mod middleware;


pub use handlers::info::ServiceInfo;

/// Message for any unmatched path/method combination
pub const ENDPOINT_NOT_FOUND: &str = "Endpoint not found";

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct HttpServerConfig {
    /// Server bind address
    pub bind_address: SocketAddr,
    /// Answer pre-flight requests and add CORS headers to every response
    pub enable_cors: bool,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 8787)),
            enable_cors: true,
        }
    }
}

/// Errors raised while running the HTTP server
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Failed to bind to {address}: {source}")]
    Bind {
        address: SocketAddr,
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub stats: Arc<dyn StatsClient>,
    pub analyst: Arc<PlayerAnalyst>,
    /// HTML served on `/`; a JSON status is returned when absent
    pub root_html: Option<Arc<str>>,
}

impl AppState {
    pub fn new(stats: Arc<dyn StatsClient>, analyst: Arc<PlayerAnalyst>) -> Self {
        Self {
            stats,
            analyst,
            root_html: None,
        }
    }

    /// Serve `html` on the root path
    pub fn with_root_html(mut self, html: impl Into<Arc<str>>) -> Self {
        self.root_html = Some(html.into());
        self
    }
}

/// Uniform error body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Error half of every handler result
pub type ErrorResponse = (StatusCode, Json<ApiError>);

/// Convert core errors to HTTP status codes and responses
pub fn handle_core_error(error: CoreError) -> ErrorResponse {
    let status = if error.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    let message = error.to_string();

    if status.is_server_error() {
        error!("API error: {} - {}", status, message);
    } else {
        warn!("Rejected request: {}", message);
    }
    (status, Json(ApiError::new(message)))
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(ApiError::new(ENDPOINT_NOT_FOUND))).into_response()
}

/// Build the Axum router with all routes
pub fn build_router(state: AppState, config: &HttpServerConfig) -> Router {
    let mut router = Router::new()
        .route("/", get(handlers::info::root).fallback(not_found))
        .route(
            "/search_player",
            get(handlers::player::search_player).fallback(not_found),
        )
        .route(
            "/player/lastgames_by_name",
            get(handlers::player::last_games_by_name).fallback(not_found),
        )
        .route(
            "/player/career_by_name",
            get(handlers::player::career_by_name).fallback(not_found),
        )
        .route(
            "/ai/analyze_player",
            post(handlers::analysis::analyze_player).fallback(not_found),
        )
        .fallback(not_found)
        .with_state(state)
        .layer(axum::middleware::from_fn(middleware::request_logging));

    if config.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }

    // `request_logging` emits the per-request line; the trace layer only opens the span
    router.layer(TraceLayer::new_for_http().on_request(()).on_response(()))
}

/// HTTP server for the Courtside API
pub struct HttpServer {
    config: HttpServerConfig,
}

impl HttpServer {
    pub fn new(config: HttpServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HttpServerConfig {
        &self.config
    }

    /// Serve until `shutdown` resolves
    pub async fn serve<F>(&self, state: AppState, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = build_router(state, &self.config);

        let listener = tokio::net::TcpListener::bind(&self.config.bind_address)
            .await
            .map_err(|source| ServerError::Bind {
                address: self.config.bind_address,
                source,
            })?;

        info!("Courtside listening on {}", self.config.bind_address);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Courtside server stopped");
        Ok(())
    }
}
