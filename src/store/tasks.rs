use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Task, TaskInput, TaskUpdate};

const TASK_COLUMNS: &str = "id, title, description, status, owner_id, created_at";

/// Data access for the `tasks` table. All lookups are keyed by the
/// store-generated UUID; ownership is not checked here, the task service
/// does that with the caller's identity.
#[derive(Clone)]
pub struct TaskStore {
    pool: PgPool,
}

impl TaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persists a new task for `owner_id` and returns its generated id.
    pub async fn insert(&self, owner_id: Uuid, input: TaskInput) -> Result<Uuid, AppError> {
        let id = Uuid::new_v4();

        sqlx::query(
            "INSERT INTO tasks (id, title, description, status, owner_id, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.status)
        .bind(owner_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    /// All tasks owned by `owner_id`, most recently created first.
    pub async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Task>, AppError> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {} FROM tasks WHERE owner_id = $1 ORDER BY created_at DESC",
            TASK_COLUMNS
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "SELECT {} FROM tasks WHERE id = $1",
            TASK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    /// Overwrites only the fields present in `update`. Returns whether a
    /// row matched.
    pub async fn update(&self, id: Uuid, update: &TaskUpdate) -> Result<bool, AppError> {
        if update.is_empty() {
            return Ok(false);
        }

        // SET clauses are appended dynamically with incrementing
        // placeholders; bind order below must match.
        let mut sets: Vec<String> = Vec::new();
        let mut param_count = 1;

        if update.title.is_some() {
            sets.push(format!("title = ${}", param_count));
            param_count += 1;
        }
        if update.description.is_some() {
            sets.push(format!("description = ${}", param_count));
            param_count += 1;
        }
        if update.status.is_some() {
            sets.push(format!("status = ${}", param_count));
            param_count += 1;
        }

        let sql = format!(
            "UPDATE tasks SET {} WHERE id = ${}",
            sets.join(", "),
            param_count
        );

        let mut query = sqlx::query(&sql);
        if let Some(title) = &update.title {
            query = query.bind(title);
        }
        if let Some(description) = &update.description {
            query = query.bind(description);
        }
        if let Some(status) = update.status {
            query = query.bind(status);
        }
        let result = query.bind(id).execute(&self.pool).await?;

        Ok(result.rows_affected() > 0)
    }

    /// Returns whether a row was deleted.
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
