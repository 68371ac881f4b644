//! AI analysis handler

use crate::{handle_core_error, AppState, ErrorResponse};
use axum::{body::Bytes, extract::State, response::Json};
use courtside_core::prelude::*;
use serde::Deserialize;

/// Body of an analysis request
#[derive(Debug, Deserialize)]
pub struct AnalyzePlayerRequest {
    pub name: Option<String>,
}

/// Analyze a player's recent games, serving cached analyses when present
///
/// The body is parsed here rather than by the `Json` extractor so that a
/// missing content type is tolerated and a malformed body yields the uniform
/// error shape.
pub async fn analyze_player(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PlayerAnalysis>, ErrorResponse> {
    let request: AnalyzePlayerRequest =
        serde_json::from_slice(&body).map_err(|e| handle_core_error(CoreError::Serialization(e)))?;

    state
        .analyst
        .analyze(request.name.as_deref())
        .await
        .map(Json)
        .map_err(handle_core_error)
}
