use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Invalid ID: {0}")]
    InvalidId(String),

    /// A statement against the datastore failed. `message` is what the client sees.
    #[error("{message}: {source}")]
    Persistence {
        message: &'static str,
        #[source]
        source: DbErr,
    },
}

pub type TaskResult<T> = Result<T, TaskError>;

impl TaskError {
    pub(crate) fn persistence(message: &'static str) -> impl FnOnce(DbErr) -> Self {
        move |source| TaskError::Persistence { message, source }
    }
}

/// Convert TaskError to AppError for the standard `{message, error}` envelope
impl From<TaskError> for AppError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::Validation(msg) => AppError::bad_request(msg),
            TaskError::InvalidId(_) => AppError::bad_request("Invalid ID"),
            TaskError::Persistence { message, source } => AppError::internal(message, source),
        }
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
