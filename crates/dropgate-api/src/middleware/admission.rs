//! Gate and rate-limit admission middleware

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::request::HttpRequest;
use crate::state::AppState;

/// Reject requests the pipeline does not admit before they reach a handler
pub async fn admission_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());

    let admitted = state.pipeline.admit(&HttpRequest::new(&request, peer));
    match admitted {
        Ok(()) => next.run(request).await,
        Err(e) => e.into_response(),
    }
}
