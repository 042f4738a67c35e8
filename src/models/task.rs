use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::validation::trimmed_min_4;

/// Represents the status of a task.
/// Corresponds to the `task_status` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task is yet to be started.
    Pending,
    /// Task is currently being worked on.
    InProgress,
    /// Task is completed.
    Done,
}

/// Represents a task entity as stored in the database and returned by
/// the API.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique identifier for the task (UUID v4, serialized as a string).
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    /// Identifier of the user who owns the task.
    pub owner_id: Uuid,
    /// Timestamp of when the task was created.
    pub created_at: DateTime<Utc>,
}

/// Input structure for creating a task.
///
/// Title and description must be at least four characters after
/// trimming; a blank or padded-short value is rejected.
#[derive(Debug, Deserialize, Validate)]
pub struct TaskInput {
    #[validate(custom = "trimmed_min_4")]
    pub title: String,

    #[validate(custom = "trimmed_min_4")]
    pub description: Option<String>,

    pub status: TaskStatus,
}

/// Partial-update payload: only the provided fields are written, and each
/// provided field passes the same constraints as creation.
#[derive(Debug, Deserialize, Validate)]
pub struct TaskUpdate {
    #[validate(custom = "trimmed_min_4")]
    pub title: Option<String>,

    #[validate(custom = "trimmed_min_4")]
    pub description: Option<String>,

    pub status: Option<TaskStatus>,
}

impl TaskUpdate {
    /// True when the payload carries nothing to write.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.status.is_none()
    }
}
