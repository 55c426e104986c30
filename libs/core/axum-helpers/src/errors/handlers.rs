use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::ErrorResponse;

/// Fallback for unmatched routes.
pub async fn not_found() -> Response {
    let body = Json(ErrorResponse {
        message: "The requested resource was not found".to_string(),
        error: None,
    });

    (StatusCode::NOT_FOUND, body).into_response()
}
