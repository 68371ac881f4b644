//! Statistics proxy handlers
//!
//! Each handler validates `name`, forwards to the statistics service and
//! returns the upstream JSON unchanged.

use crate::{handle_core_error, ApiError, AppState, ErrorResponse};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::Json,
};
use courtside_core::prelude::*;
use serde_json::Value;
use tracing::debug;

/// Message returned when a proxy request has no usable `name`
pub const MISSING_NAME_PARAMETER: &str = "Missing name parameter!";

/// Games requested when `num_games` is absent or empty
pub const DEFAULT_NUM_GAMES: &str = "5";

/// Raw query pairs in request order
///
/// Repeated keys are kept so that lookups can take the first occurrence.
type QueryPairs = Vec<(String, String)>;

fn first_param<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k.as_str() == key)
        .map(|(_, v)| v.as_str())
}

fn bad_request(message: impl Into<String>) -> ErrorResponse {
    (StatusCode::BAD_REQUEST, Json(ApiError::new(message)))
}

fn require_name(name: Option<&str>) -> Result<PlayerName, ErrorResponse> {
    PlayerName::parse(name).ok_or_else(|| bad_request(MISSING_NAME_PARAMETER))
}

fn upstream_error(error: StatsError) -> ErrorResponse {
    handle_core_error(CoreError::Stats(error))
}

/// Search players by name
pub async fn search_player(
    State(state): State<AppState>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> Result<Json<Value>, ErrorResponse> {
    let Query(pairs) = query.map_err(|e| bad_request(e.body_text()))?;
    let name = require_name(first_param(&pairs, "name"))?;

    debug!("Searching players for {}", name);
    state
        .stats
        .search_player(name.as_str())
        .await
        .map(Json)
        .map_err(upstream_error)
}

/// Most recent games for a player
pub async fn last_games_by_name(
    State(state): State<AppState>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> Result<Json<Value>, ErrorResponse> {
    let Query(pairs) = query.map_err(|e| bad_request(e.body_text()))?;
    let name = require_name(first_param(&pairs, "name"))?;
    let num_games = first_param(&pairs, "num_games")
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_NUM_GAMES);

    debug!("Fetching last {} games for {}", num_games, name);
    state
        .stats
        .last_games(name.as_str(), num_games)
        .await
        .map(Json)
        .map_err(upstream_error)
}

/// Career totals for a player
pub async fn career_by_name(
    State(state): State<AppState>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> Result<Json<Value>, ErrorResponse> {
    let Query(pairs) = query.map_err(|e| bad_request(e.body_text()))?;
    let name = require_name(first_param(&pairs, "name"))?;

    debug!("Fetching career totals for {}", name);
    state
        .stats
        .career(name.as_str())
        .await
        .map(Json)
        .map_err(upstream_error)
}
