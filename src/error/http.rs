//! HTTP error mapping.
//!
//! Maps [`ApiError`] to an HTTP status code and a JSON body of the form
//! `{"message": "...", "details": "..."}`.
//!
//! # Strategy
//! - Malformed identifiers → 400
//! - Missing endpoint, or a failed namespace check → 404
//! - Namespace not authorized → 403
//! - Everything else → 500

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::{error, warn};

use super::ApiError;

/// JSON body returned for failed requests
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub message: &'a str,
    pub details: &'a str,
}

impl ApiError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!(status = status.as_u16(), details = self.details(), "{}", self.message());
        } else {
            warn!(status = status.as_u16(), details = self.details(), "{}", self.message());
        }

        let body = ErrorBody {
            message: self.message(),
            details: self.details(),
        };
        (status, Json(body)).into_response()
    }
}
