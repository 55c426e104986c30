use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::TaskResult;
use crate::models::Task;

/// Persistence gateway for tasks
///
/// Each method is a single statement with no existence checks. `update` and
/// `delete` report how many rows they touched; zero is not an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Every task, in whatever order the store yields them
    async fn list_all(&self) -> TaskResult<Vec<Task>>;

    /// Insert a task with the given title and return its generated id
    async fn insert(&self, title: &str) -> TaskResult<i64>;

    async fn update(&self, id: i64, title: &str, completed: bool) -> TaskResult<u64>;

    async fn delete(&self, id: i64) -> TaskResult<u64>;
}

#[derive(Debug, Default)]
struct MemoryState {
    tasks: BTreeMap<i64, Task>,
    last_id: i64,
}

/// In-memory implementation of TaskRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<MemoryState>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn list_all(&self) -> TaskResult<Vec<Task>> {
        let state = self.state.read().await;
        Ok(state.tasks.values().cloned().collect())
    }

    async fn insert(&self, title: &str) -> TaskResult<i64> {
        let mut state = self.state.write().await;
        state.last_id += 1;
        let id = state.last_id;

        state.tasks.insert(
            id,
            Task {
                id,
                title: title.to_string(),
                completed: false,
                created_at: Utc::now(),
            },
        );

        Ok(id)
    }

    async fn update(&self, id: i64, title: &str, completed: bool) -> TaskResult<u64> {
        let mut state = self.state.write().await;
        match state.tasks.get_mut(&id) {
            Some(task) => {
                task.title = title.to_string();
                task.completed = completed;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: i64) -> TaskResult<u64> {
        let mut state = self.state.write().await;
        Ok(state.tasks.remove(&id).map_or(0, |_| 1))
    }
}
