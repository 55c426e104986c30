use std::sync::Arc;
use tracing::instrument;
use validator::{Validate, ValidationErrors};

use crate::error::{TaskError, TaskResult};
use crate::models::{CreateTask, Task, UpdateTask};
use crate::repository::TaskRepository;

/// Service layer for Task operations
pub struct TaskService<R: TaskRepository> {
    repository: Arc<R>,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn list_tasks(&self) -> TaskResult<Vec<Task>> {
        self.repository.list_all().await
    }

    /// Validate and insert. `input.completed` is ignored.
    #[instrument(skip(self, input), fields(task_title = %input.title))]
    pub async fn create_task(&self, input: CreateTask) -> TaskResult<i64> {
        input.validate().map_err(validation_error)?;

        self.repository.insert(&input.title).await
    }

    /// Overwrite title and completed. A missing id is not an error.
    #[instrument(skip(self, input), fields(task_id = id))]
    pub async fn update_task(&self, id: i64, input: UpdateTask) -> TaskResult<()> {
        input.validate().map_err(validation_error)?;

        let rows = self
            .repository
            .update(id, &input.title, input.completed)
            .await?;
        tracing::debug!(rows_affected = rows, "Task update applied");

        Ok(())
    }

    /// Delete by id. A missing id is not an error.
    #[instrument(skip(self), fields(task_id = id))]
    pub async fn delete_task(&self, id: i64) -> TaskResult<()> {
        let rows = self.repository.delete(id).await?;
        tracing::debug!(rows_affected = rows, "Task delete applied");

        Ok(())
    }
}

/// First field message, e.g. "Title is required"
fn validation_error(errors: ValidationErrors) -> TaskError {
    let message = errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| errors.to_string());

    TaskError::Validation(message)
}
