use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, DbErr, FromQueryResult, Statement};

use crate::{
    error::{TaskError, TaskResult},
    models::Task,
    repository::TaskRepository,
};

const SELECT_ALL: &str = "SELECT id, title, completed, created_at FROM tasks";
const INSERT: &str = "INSERT INTO tasks (title) VALUES ($1) RETURNING id";
const UPDATE: &str = "UPDATE tasks SET title = $1, completed = $2 WHERE id = $3";
const DELETE: &str = "DELETE FROM tasks WHERE id = $1";

/// PostgreSQL gateway issuing one autocommit statement per call
pub struct PgTaskRepository {
    db: DatabaseConnection,
}

impl PgTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn list_all(&self) -> TaskResult<Vec<Task>> {
        let stmt = Statement::from_string(DbBackend::Postgres, SELECT_ALL);

        let rows = self
            .db
            .query_all_raw(stmt)
            .await
            .map_err(TaskError::persistence("Failed to fetch tasks"))?;

        let total = rows.len();
        let tasks: Vec<Task> = rows
            .iter()
            .filter_map(|row| match Task::from_query_result(row, "") {
                Ok(task) => Some(task),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping task row that failed to decode");
                    None
                }
            })
            .collect();

        tracing::debug!(total, returned = tasks.len(), "Fetched tasks");
        Ok(tasks)
    }

    async fn insert(&self, title: &str) -> TaskResult<i64> {
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, INSERT, [title.into()]);

        let id = self
            .db
            .query_one_raw(stmt)
            .await
            .and_then(|row| {
                row.ok_or_else(|| DbErr::RecordNotInserted)?
                    .try_get::<i64>("", "id")
            })
            .map_err(TaskError::persistence("Failed to create task"))?;

        tracing::info!(task_id = id, "Created task");
        Ok(id)
    }

    async fn update(&self, id: i64, title: &str, completed: bool) -> TaskResult<u64> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            UPDATE,
            [title.into(), completed.into(), id.into()],
        );

        let result = self
            .db
            .execute_raw(stmt)
            .await
            .map_err(TaskError::persistence("Update failed"))?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i64) -> TaskResult<u64> {
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, DELETE, [id.into()]);

        let result = self
            .db
            .execute_raw(stmt)
            .await
            .map_err(TaskError::persistence("Delete failed"))?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Transaction, Value};
    use std::collections::BTreeMap;

    fn created_at() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-03-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn row(id: i64, title: &str, completed: bool) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([
            ("id", id.into()),
            ("title", title.into()),
            ("completed", completed.into()),
            ("created_at", created_at().into()),
        ])
    }

    #[tokio::test]
    async fn test_list_all_decodes_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(1, "write", false), row(2, "review", true)]])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        let tasks = repo.list_all().await.unwrap();

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].title, "write");
        assert_eq!(tasks[1].id, 2);
        assert!(tasks[1].completed);
        assert_eq!(tasks[0].created_at, created_at());
    }

    #[tokio::test]
    async fn test_list_all_skips_undecodable_rows() {
        let mut broken = row(2, "broken", false);
        broken.remove("title");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(1, "fine", false), broken, row(3, "also fine", true)]])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        let ids: Vec<i64> = repo.list_all().await.unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_list_all_empty_table() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<BTreeMap<&str, Value>>::new()])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        assert!(repo.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_all_surfaces_statement_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("relation \"tasks\" does not exist".into())])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        let err = repo.list_all().await.unwrap_err();
        assert!(matches!(
            err,
            TaskError::Persistence { message: "Failed to fetch tasks", .. }
        ));
    }

    #[tokio::test]
    async fn test_insert_returns_generated_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![BTreeMap::from([("id", Value::from(41i64))])]])
            .into_connection();
        let repo = PgTaskRepository::new(db.clone());

        assert_eq!(repo.insert("buy milk").await.unwrap(), 41);

        assert_eq!(
            db.into_transaction_log(),
            vec![Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                INSERT,
                ["buy milk".into()],
            )]
        );
    }

    #[tokio::test]
    async fn test_insert_failure_is_create_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".into())])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        let err = repo.insert("buy milk").await.unwrap_err();
        assert!(matches!(
            err,
            TaskError::Persistence { message: "Failed to create task", .. }
        ));
    }

    #[tokio::test]
    async fn test_update_reports_rows_affected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();
        let repo = PgTaskRepository::new(db.clone());

        assert_eq!(repo.update(5, "renamed", true).await.unwrap(), 1);
        assert_eq!(repo.update(999, "ghost", false).await.unwrap(), 0);

        let log = db.into_transaction_log();
        assert_eq!(
            log[0],
            Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                UPDATE,
                ["renamed".into(), true.into(), 5i64.into()],
            )
        );
    }

    #[tokio::test]
    async fn test_update_failure() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_errors([DbErr::Custom("deadlock detected".into())])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        let err = repo.update(1, "x", false).await.unwrap_err();
        assert!(matches!(err, TaskError::Persistence { message: "Update failed", .. }));
    }

    #[tokio::test]
    async fn test_delete_reports_rows_affected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        assert_eq!(repo.delete(3).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_failure() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_errors([DbErr::Custom("connection closed".into())])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        let err = repo.delete(3).await.unwrap_err();
        assert!(matches!(err, TaskError::Persistence { message: "Delete failed", .. }));
    }
}
