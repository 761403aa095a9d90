//! API error types and handling

use std::time::Duration;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use dropgate_config::ConfigError;
use dropgate_security::Denial;
use dropgate_warehouse::WarehouseError;
use serde_json::json;
use thiserror::Error;

/// API error types
///
/// Messages are safe to show to clients. Upstream detail is logged where the
/// failure happens and never carried here.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("data type '{0}' not found or disabled")]
    NotFoundOrDisabled(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("rate limit exceeded")]
    RateLimited { retry_after: Duration },

    #[error("{message}")]
    Upstream {
        message: &'static str,
        retryable: bool,
    },

    #[error("failed to encode response")]
    Encoding(#[from] serde_json::Error),

    #[error("{0}")]
    Configuration(String),
}

impl ApiError {
    /// Map a data-source failure to a generic client message, logging the detail
    pub fn upstream(message: &'static str, error: &WarehouseError) -> Self {
        tracing::error!(error = %error, retryable = error.is_retryable(), "{}", message);
        ApiError::Upstream {
            message,
            retryable: error.is_retryable(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFoundOrDisabled(_) => StatusCode::NOT_FOUND,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Upstream { retryable: true, .. } => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Upstream { retryable: false, .. } => StatusCode::BAD_GATEWAY,
            ApiError::Encoding(_) | ApiError::Configuration(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation_error",
            ApiError::NotFoundOrDisabled(_) => "not_found_or_disabled",
            ApiError::Forbidden(_) => "forbidden",
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::RateLimited { .. } => "rate_limited",
            ApiError::Upstream { .. } => "upstream_error",
            ApiError::Encoding(_) => "encoding_error",
            ApiError::Configuration(_) => "configuration_error",
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApiError::RateLimited { .. } | ApiError::Upstream { retryable: true, .. }
        )
    }
}

impl From<Denial> for ApiError {
    fn from(denial: Denial) -> Self {
        match denial {
            Denial::Forbidden => ApiError::Forbidden("forbidden".to_string()),
            Denial::Unauthorized(message) => ApiError::Unauthorized(message),
            Denial::RateLimited { retry_after } => ApiError::RateLimited { retry_after },
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(error: ConfigError) -> Self {
        match error {
            ConfigError::NotFoundOrDisabled(id) => ApiError::NotFoundOrDisabled(id),
            other => {
                tracing::error!(error = %other, "Configuration error while serving request");
                ApiError::Configuration("configuration error".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Encoding(e) = &self {
            tracing::error!(error = %e, "Response encoding failed");
        }

        let status = self.status();
        let body = Json(json!({
            "error": {
                "type": self.kind(),
                "message": self.to_string(),
            }
        }));

        let mut response = (status, body).into_response();
        if let ApiError::RateLimited { retry_after } = &self {
            let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs.max(1)));
        }
        response
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::Validation("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFoundOrDisabled("gl".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(ApiError::from(Denial::Forbidden).status(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::from(Denial::unauthorized("missing token")).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(ConfigError::NotFoundOrDisabled("cc".into())).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_retry_after_header_rounds_up() {
        let response = ApiError::RateLimited {
            retry_after: Duration::from_millis(40_200),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "41");
    }

    #[test]
    fn test_upstream_hides_detail() {
        let err = ApiError::upstream(
            "search failed",
            &WarehouseError::Query("syntax error near SELEKT in FINANCE.cost_center".into()),
        );
        assert_eq!(err.to_string(), "search failed");
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert!(!err.is_retryable());

        let err = ApiError::upstream("search failed", &WarehouseError::Timeout(30));
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(err.is_retryable());
    }
}
