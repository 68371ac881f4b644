//! Root information handler

use crate::AppState;
use axum::{
    extract::State,
    response::{Html, IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

/// Status payload returned on `/` when no HTML page is configured
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            message: "Courtside NBA AI agent is running".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Root endpoint
pub async fn root(State(state): State<AppState>) -> Response {
    match state.root_html {
        Some(html) => Html(html.to_string()).into_response(),
        None => Json(ServiceInfo::default()).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_info_default() {
        let info = ServiceInfo::default();
        assert!(info.message.contains("running"));
        assert!(!info.version.is_empty());
    }
}
