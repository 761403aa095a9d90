//! Request logging middleware

use std::time::{Duration, Instant};

use axum::{extract::Request, middleware::Next, response::Response};

const SLOW_REQUEST: Duration = Duration::from_millis(100);

/// Log method, path, status and latency; warn on slow requests
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let start = Instant::now();
    let response = next.run(request).await;
    let duration = start.elapsed();

    if duration > SLOW_REQUEST {
        tracing::warn!(%method, %path, elapsed_ms = duration.as_millis() as u64, "Slow request");
    }

    tracing::info!(
        %method,
        %path,
        status = response.status().as_u16(),
        elapsed_ms = duration.as_millis() as u64,
        "Request completed"
    );

    response
}
