//! Configuration and data-type listing endpoints

use axum::{extract::State, Json};

use crate::{
    error::{ApiError, ApiResult},
    models::{ClientSearchSettings, ConfigResponse, DataTypeInfo, DataTypeSummary},
    state::AppState,
};

/// Frontend configuration: enabled data types, default type, search-UI settings
#[utoipa::path(
    get,
    path = "/api/config",
    responses(
        (status = 200, description = "Frontend configuration", body = ConfigResponse),
        (status = 500, description = "No enabled data types")
    )
)]
pub async fn get_config(State(state): State<AppState>) -> ApiResult<Json<ConfigResponse>> {
    let enabled = state.pipeline.catalog().list_enabled();
    if enabled.is_empty() {
        return Err(ApiError::Configuration(
            "No enabled data types found".to_string(),
        ));
    }

    Ok(Json(ConfigResponse {
        data_types: enabled.into_iter().map(DataTypeInfo::from).collect(),
        default_type: state.config.default_data_type.clone(),
        search_settings: ClientSearchSettings::from(&state.config.search_settings),
    }))
}

/// Enabled data types in configuration order
#[utoipa::path(
    get,
    path = "/api/types",
    responses(
        (status = 200, description = "Enabled data types", body = [DataTypeSummary])
    )
)]
pub async fn list_types(State(state): State<AppState>) -> Json<Vec<DataTypeSummary>> {
    Json(
        state
            .pipeline
            .catalog()
            .list_enabled()
            .into_iter()
            .map(DataTypeSummary::from)
            .collect(),
    )
}
