use crate::errors::AppError;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

const INVALID_BODY: &str = "Invalid request body";

/// JSON body extractor that does not insist on a `Content-Type` header.
///
/// Axum's `Json` rejects requests without `application/json`. Clients of this
/// API routinely omit the header, so the body is read as raw bytes and decoded
/// directly. Any failure becomes a 400 with the decoder's message in `error`.
///
/// # Example
///
/// ```ignore
/// use axum_helpers::JsonBody;
///
/// async fn create(JsonBody(payload): JsonBody<CreateTask>) -> impl IntoResponse {
///     // payload is already decoded
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::bad_request_with(INVALID_BODY, rejection.body_text()))?;

        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|e| AppError::bad_request_with(INVALID_BODY, e))
    }
}
