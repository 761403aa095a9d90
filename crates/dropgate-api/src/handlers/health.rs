//! Health check endpoint

use axum::{extract::State, Json};
use chrono::{SecondsFormat, Utc};

use crate::{models::HealthResponse, state::AppState};

/// Health check endpoint; never gated or rate limited
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let cache = state.pipeline.cache_stats().unwrap_or_default();
    Json(HealthResponse {
        status: "healthy".to_string(),
        time: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        cache_entries: cache.entries,
        cache_hits: cache.hits,
        cache_misses: cache.misses,
    })
}
