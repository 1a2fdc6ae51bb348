use std::time::{Duration, Instant};

use axum::{extract::Request, middleware::Next, response::Response};
use tower_http::cors::{Any, CorsLayer};

const SLOW_REQUEST_THRESHOLD: Duration = Duration::from_secs(5);

/// Log method, path, status and duration of every request
pub async fn request_timing_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;
    let duration = start.elapsed();
    let status = response.status().as_u16();

    if duration > SLOW_REQUEST_THRESHOLD {
        tracing::warn!(
            method = %method,
            path = %path,
            status,
            duration_ms = duration.as_millis(),
            "Slow request detected"
        );
    } else {
        tracing::info!(
            method = %method,
            path = %path,
            status,
            duration_ms = duration.as_millis(),
            "Request completed"
        );
    }

    response
}

/// Any origin, method and header, for the clinic front-end
pub fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600))
}
