//! Middleware for the Courtside HTTP layer

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Header carrying the per-request identifier
pub const REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Request logging middleware
pub async fn request_logging(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start_time = Instant::now();

    debug!("[{}] Incoming request: {} {}", request_id, method, uri);

    let mut response = next.run(request).await;

    let duration = start_time.elapsed();
    let status = response.status();

    if status.is_success() {
        info!("[{}] {} {} - {} ({:?})", request_id, method, uri, status, duration);
    } else {
        warn!("[{}] {} {} - {} ({:?})", request_id, method, uri, status, duration);
    }

    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID, value);
    }
    response
}
