//! Error taxonomy shared by every endpoint and its HTTP mapping.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Payload did not match the endpoint's schema.
    #[error("{0}")]
    Validation(String),

    /// Uniqueness violation the user can act on.
    #[error("{0}")]
    Conflict(String),

    /// A store the endpoint needs was not configured at startup.
    #[error("{0}")]
    NotConfigured(String),

    /// Anything else. The message is generic; details go to the log only.
    #[error("{0}")]
    Internal(String),

    /// The body could not be read at all, e.g. it exceeded the size limit. Keeps the
    /// extractor's own status.
    #[error("{message}")]
    Body { status: StatusCode, message: String },
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::NotConfigured(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Body { status, .. } => *status,
        }
    }

    /// Schema, syntax and content-type rejections become 422; body read failures keep theirs.
    pub fn from_rejection(err: JsonRejection, expected: &str) -> Self {
        match err {
            JsonRejection::BytesRejection(r) => ApiError::Body {
                status: r.status(),
                message: r.body_text(),
            },
            other => ApiError::Validation(format!(
                "Invalid JSON body: {} (expected: {})",
                other.body_text(),
                expected
            )),
        }
    }
}

/// Error body. `detail` is what the web client shows.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub detail: String,
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        Self {
            success: false,
            detail: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(ErrorResponse::from(self))).into_response()
    }
}
