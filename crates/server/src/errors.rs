use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorResponse;
use service::customer::errors::CustomerError;
use thiserror::Error;
use tracing::{error, warn};

use crate::metrics;

/// HTTP-facing error: a status plus the `{"message": ...}` envelope.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self { Self::new(StatusCode::BAD_REQUEST, message) }

    /// Body could not be parsed into the expected JSON shape.
    pub fn unprocessable(rejection: JsonRejection) -> Self {
        metrics::record_error("malformed_json");
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text())
    }
}

impl From<CustomerError> for ApiError {
    fn from(e: CustomerError) -> Self {
        metrics::record_error(e.kind());
        let status = match &e {
            CustomerError::Validation(_) => StatusCode::BAD_REQUEST,
            CustomerError::Conflict(_) => StatusCode::CONFLICT,
            CustomerError::NotFound(_) => StatusCode::NOT_FOUND,
            CustomerError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(code = e.code(), err = %e, "customer operation failed");
        } else {
            warn!(code = e.code(), kind = e.kind(), err = %e, "customer request rejected");
        }
        Self::new(status, e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse::new(self.message))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
}
