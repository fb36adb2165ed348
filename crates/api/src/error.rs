//! JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use freightbook_core::aggregator::AggregationError;
use freightbook_core::factoring::FactoringError;
use freightbook_core::trend::TrendError;
use freightbook_shared::AppError;
use serde_json::json;
use tracing::error;

/// Handler error rendered as `{ "error": ..., "message": ... }`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = if status.is_server_error() {
            error!(error = %self.0, "Request failed");
            "An error occurred".to_string()
        } else {
            self.0.to_string()
        };

        (
            status,
            Json(json!({
                "error": self.0.error_code().to_ascii_lowercase(),
                "message": message
            })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<AggregationError> for ApiError {
    fn from(err: AggregationError) -> Self {
        Self(err.into())
    }
}

impl From<TrendError> for ApiError {
    fn from(err: TrendError) -> Self {
        Self(err.into())
    }
}

impl From<FactoringError> for ApiError {
    fn from(err: FactoringError) -> Self {
        Self(err.into())
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;
