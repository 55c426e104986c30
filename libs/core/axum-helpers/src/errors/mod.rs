pub mod handlers;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Error body returned by every failing endpoint.
///
/// `message` is always present. `error` carries the underlying cause when
/// there is one worth showing (a JSON decode error, a database error).
///
/// # JSON Example
///
/// ```json
/// {
///   "message": "Invalid request body",
///   "error": "expected value at line 1 column 1"
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub message: String,
    /// Underlying cause, when available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Application error type that can be converted to HTTP responses.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Bad Request: {message}")]
    BadRequest {
        message: String,
        error: Option<String>,
    },

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Internal Server Error: {message}")]
    InternalServerError {
        message: String,
        error: Option<String>,
    },

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest {
            message: message.into(),
            error: None,
        }
    }

    pub fn bad_request_with(message: impl Into<String>, error: impl ToString) -> Self {
        AppError::BadRequest {
            message: message.into(),
            error: Some(error.to_string()),
        }
    }

    pub fn internal(message: impl Into<String>, error: impl ToString) -> Self {
        AppError::InternalServerError {
            message: message.into(),
            error: Some(error.to_string()),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            AppError::BadRequest { message, error } => {
                tracing::warn!(error = ?error, "Bad request: {}", message);
                ErrorResponse { message, error }
            }
            AppError::NotFound(message) => {
                tracing::debug!("Not found: {}", message);
                ErrorResponse {
                    message,
                    error: None,
                }
            }
            AppError::InternalServerError { message, error } => {
                tracing::error!(error = ?error, "Internal server error: {}", message);
                ErrorResponse { message, error }
            }
            AppError::ServiceUnavailable(message) => {
                tracing::error!("Service unavailable: {}", message);
                ErrorResponse {
                    message,
                    error: None,
                }
            }
        };

        (status, Json(body)).into_response()
    }
}
