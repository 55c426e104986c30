use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, FromRequestParts, Path, State},
    http::{StatusCode, request::Parts},
    response::IntoResponse,
    routing::{get, put},
};
use axum_helpers::{AppError, ErrorResponse, JsonBody};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{TaskError, TaskResult};
use crate::models::{CreateTask, MessageResponse, Task, TaskCreated, TaskList, UpdateTask};
use crate::repository::TaskRepository;
use crate::service::TaskService;

/// OpenAPI documentation for the Tasks API
///
/// Paths are relative; nest this document under [`BASE_PATH`].
#[derive(OpenApi)]
#[openapi(
    paths(list_tasks, create_task, update_task, delete_task),
    components(schemas(
        Task,
        TaskList,
        CreateTask,
        UpdateTask,
        TaskCreated,
        MessageResponse,
        ErrorResponse
    )),
    tags((name = "tasks", description = "Task CRUD operations"))
)]
pub struct TasksApiDoc;

/// Task id taken from the `{id}` path segment.
///
/// Parsed before the body is read, so a bad id is reported even when the
/// body is also malformed.
#[derive(Debug, Clone, Copy)]
pub struct TaskId(pub i64);

impl<S> FromRequestParts<S> for TaskId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::bad_request("Invalid ID"))?;

        parse_id(&raw).map(TaskId).map_err(Into::into)
    }
}

fn parse_id(raw: &str) -> TaskResult<i64> {
    raw.parse::<i64>()
        .map_err(|_| TaskError::InvalidId(raw.to_string()))
}

/// List all tasks
#[utoipa::path(
    get,
    path = "",
    tag = "tasks",
    responses(
        (status = 200, description = "All tasks, in storage order", body = TaskList),
        (status = 500, description = "Failed to fetch tasks", body = ErrorResponse)
    )
)]
pub async fn list_tasks<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
) -> TaskResult<Json<TaskList>> {
    let data = service.list_tasks().await?;
    Ok(Json(TaskList { data }))
}

/// Create a new task
#[utoipa::path(
    post,
    path = "",
    tag = "tasks",
    request_body = CreateTask,
    responses(
        (status = 201, description = "Task created", body = TaskCreated),
        (status = 400, description = "Invalid body or empty title", body = ErrorResponse),
        (status = 500, description = "Failed to create task", body = ErrorResponse)
    )
)]
pub async fn create_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    JsonBody(input): JsonBody<CreateTask>,
) -> TaskResult<impl IntoResponse> {
    let task_id = service.create_task(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(TaskCreated {
            message: "Task created".to_string(),
            task_id,
        }),
    ))
}

/// Replace a task's title and completed flag
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "tasks",
    params(
        ("id" = i64, Path, description = "Task ID")
    ),
    request_body = UpdateTask,
    responses(
        (status = 200, description = "Task updated (also when no task has this id)", body = MessageResponse),
        (status = 400, description = "Invalid ID, invalid body or empty title", body = ErrorResponse),
        (status = 500, description = "Update failed", body = ErrorResponse)
    )
)]
pub async fn update_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    TaskId(id): TaskId,
    JsonBody(input): JsonBody<UpdateTask>,
) -> TaskResult<Json<MessageResponse>> {
    service.update_task(id, input).await?;
    Ok(Json(MessageResponse::new("Task updated")))
}

/// Delete a task
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "tasks",
    params(
        ("id" = i64, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task deleted (also when no task has this id)", body = MessageResponse),
        (status = 400, description = "Invalid ID", body = ErrorResponse),
        (status = 500, description = "Delete failed", body = ErrorResponse)
    )
)]
pub async fn delete_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    TaskId(id): TaskId,
) -> TaskResult<Json<MessageResponse>> {
    service.delete_task(id).await?;
    Ok(Json(MessageResponse::new("Task deleted")))
}

/// Prefix every task route lives under
pub const BASE_PATH: &str = "/task";

/// Router for the task endpoints, merged into the application as-is.
///
/// The collection answers on both `/task` and `/task/`. Request bodies have
/// no size limit.
pub fn router<R: TaskRepository + 'static>(service: TaskService<R>) -> Router {
    let shared_service = Arc::new(service);
    let collection = get(list_tasks::<R>).post(create_task::<R>);

    Router::new()
        .route(BASE_PATH, collection.clone())
        .route(&format!("{BASE_PATH}/"), collection)
        .route(
            &format!("{BASE_PATH}/{{id}}"),
            put(update_task::<R>).delete(delete_task::<R>),
        )
        .layer(DefaultBodyLimit::disable())
        .with_state(shared_service)
}
