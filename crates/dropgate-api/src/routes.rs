//! API route definitions

use axum::{
    http::{header, HeaderValue, Method},
    middleware::{from_fn, from_fn_with_state},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use utoipa::OpenApi;

use crate::{
    error::ApiResult,
    handlers::{catalog, health, search},
    middleware::{admission_middleware, logging_middleware},
    state::AppState,
};

const AZURE_DEVOPS_ORIGIN: &str = "https://dev.azure.com";
const HOST_ORIGIN_SUFFIXES: [&str; 3] = [
    ".visualstudio.com",
    ".gallery.vsassets.io",
    ".gallerycdn.vsassets.io",
];
const LOCALHOST_PREFIX: &str = "http://localhost:";

/// API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/config", get(catalog::get_config))
        .route("/api/types", get(catalog::list_types))
        .route("/api/search", get(search::missing_type))
        .route("/api/search/", get(search::missing_type))
        .route("/api/search/:type", get(search::search))
        .route("/api/dynamic-search", post(search::dynamic_search))
        .route("/api/openapi.json", get(openapi_json))
}

/// Full application: routes, admission, request logging and CORS.
///
/// CORS is outermost so preflight requests are answered before admission runs.
pub fn app(state: AppState, extra_origins: Vec<String>) -> Router {
    api_routes()
        .layer(from_fn_with_state(state.clone(), admission_middleware))
        .layer(from_fn(logging_middleware))
        .layer(cors_layer(extra_origins))
        .with_state(state)
}

/// CORS for the dropdown widget's host pages
pub fn cors_layer(extra_origins: Vec<String>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _| {
            origin
                .to_str()
                .map(|origin| origin_allowed(origin, &extra_origins))
                .unwrap_or(false)
        }))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
}

/// Whether a browser origin may call the API
pub fn origin_allowed(origin: &str, extra_origins: &[String]) -> bool {
    origin == AZURE_DEVOPS_ORIGIN
        || HOST_ORIGIN_SUFFIXES
            .iter()
            .any(|suffix| origin.contains(suffix))
        || origin.starts_with(LOCALHOST_PREFIX)
        || extra_origins.iter().any(|allowed| allowed == origin)
}

async fn openapi_json() -> ApiResult<impl IntoResponse> {
    let body = ApiDoc::openapi().to_json()?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        catalog::get_config,
        catalog::list_types,
        search::search,
        search::dynamic_search,
    ),
    components(schemas(
        crate::models::DropdownItem,
        crate::models::DropdownResponse,
        crate::models::Metadata,
        crate::models::DataTypeInfo,
        crate::models::DataTypeSummary,
        crate::models::ClientSearchSettings,
        crate::models::ConfigResponse,
        crate::models::DynamicSearchRequest,
        crate::models::HealthResponse,
    )),
    info(
        title = "dropgate",
        description = "Configuration-driven search gateway for dropdown widgets"
    )
)]
pub struct ApiDoc;
