//! Search endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};

use crate::{
    error::{ApiError, ApiResult},
    models::{DropdownResponse, DynamicSearchRequest, SearchParams},
    state::AppState,
};

/// Catalog-driven search for one data type
#[utoipa::path(
    get,
    path = "/api/search/{type}",
    params(
        ("type" = String, Path, description = "Data type id"),
        SearchParams
    ),
    responses(
        (status = 200, description = "Matching rows", body = DropdownResponse),
        (status = 400, description = "Missing data type or term too long"),
        (status = 404, description = "Unknown or disabled data type"),
        (status = 429, description = "Rate limit exceeded"),
        (status = 503, description = "Data source unavailable")
    )
)]
pub async fn search(
    State(state): State<AppState>,
    Path(data_type): Path<String>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<DropdownResponse>> {
    state
        .pipeline
        .search(&data_type, &params.q)
        .await
        .map(Json)
}

/// `/api/search` without a type segment
pub async fn missing_type() -> ApiError {
    ApiError::Validation("data type is required".to_string())
}

/// Run a caller-supplied SELECT query
#[utoipa::path(
    post,
    path = "/api/dynamic-search",
    request_body = DynamicSearchRequest,
    responses(
        (status = 200, description = "Rows returned by the query", body = DropdownResponse),
        (status = 400, description = "Malformed request body"),
        (status = 403, description = "Query does not start with SELECT")
    )
)]
pub async fn dynamic_search(
    State(state): State<AppState>,
    payload: Result<Json<DynamicSearchRequest>, JsonRejection>,
) -> ApiResult<Json<DropdownResponse>> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected dynamic search body");
        ApiError::Validation("invalid request".to_string())
    })?;

    state.pipeline.dynamic_search(request).await.map(Json)
}
