//! API response types.

use crate::middleware::current_request_id;
use behemoth_core::{BehemothError, ErrorResponse};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

/// Tags an error body with the id of the request being served.
pub fn traced(response: ErrorResponse) -> ErrorResponse {
    match current_request_id() {
        Some(id) => response.with_trace_id(id),
        None => response,
    }
}

/// Application error type for Axum.
#[derive(Debug)]
pub struct AppError(pub BehemothError);

impl From<BehemothError> for AppError {
    fn from(err: BehemothError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // The response body hides these details
        if status.is_server_error() {
            error!(code = self.0.error_code(), "Request failed: {}", self.0);
        }

        (status, Json(traced(ErrorResponse::from_error(&self.0)))).into_response()
    }
}

/// Result type for Axum handlers.
pub type ApiResult<T> = Result<Json<T>, AppError>;

/// Helper to create a success response.
#[allow(clippy::unnecessary_wraps)]
pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok(Json(data))
}
