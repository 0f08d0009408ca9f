//! # Error-to-Response Mapping
//!
//! Pipeline errors become envelope responses at the boundary. 500s log
//! their detail and emit only a generic message; client errors pass
//! through as-is.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::ApiError;

use super::response::ErrorBody;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = match self {
            ApiError::ValidationFailed(violations) => ErrorBody::violations(violations),
            ApiError::Unexpected(detail) => {
                tracing::error!(%detail, "unexpected error");
                ErrorBody::message("Internal server error")
            }
            other => {
                tracing::warn!(error = %other, "request rejected");
                ErrorBody::message(other.to_string())
            }
        };

        (status, Json(body)).into_response()
    }
}
