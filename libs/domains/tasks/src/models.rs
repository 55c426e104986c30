use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A task row as stored in the `tasks` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromQueryResult, ToSchema)]
pub struct Task {
    /// Generated by the datastore, never reused
    pub id: i64,
    pub title: String,
    pub completed: bool,
    /// Set by the datastore on insert
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /task`
///
/// `completed` is accepted for compatibility but new tasks always start incomplete.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTask {
    #[serde(default)]
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[serde(default)]
    pub completed: bool,
}

/// Body of `PUT /task/{id}`. Both fields are written unconditionally.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateTask {
    #[serde(default)]
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[serde(default)]
    pub completed: bool,
}

/// Response of `GET /task`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TaskList {
    pub data: Vec<Task>,
}

/// Response of `POST /task`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TaskCreated {
    pub message: String,
    pub task_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
