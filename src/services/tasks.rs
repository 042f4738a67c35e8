use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::models::{Task, TaskInput, TaskUpdate};
use crate::store::TaskStore;

/// Task operations scoped to a caller.
///
/// Every operation beyond creation takes the authenticated caller's id
/// and enforces ownership here, in the domain layer, so any transport in
/// front of this service gets the same guarantee. A task that does not
/// exist and a task owned by someone else are indistinguishable to the
/// caller: both answer not-found.
#[derive(Clone)]
pub struct TaskService {
    tasks: TaskStore,
}

impl TaskService {
    pub fn new(tasks: TaskStore) -> Self {
        Self { tasks }
    }

    pub async fn create(&self, owner_id: Uuid, input: TaskInput) -> Result<Uuid, AppError> {
        input.validate()?;
        self.tasks.insert(owner_id, input).await
    }

    /// The caller's tasks, most recently created first.
    pub async fn list(&self, owner_id: Uuid) -> Result<Vec<Task>, AppError> {
        self.tasks.list_by_owner(owner_id).await
    }

    pub async fn get(&self, caller_id: Uuid, task_id: Uuid) -> Result<Task, AppError> {
        self.owned(caller_id, task_id).await
    }

    /// Overwrites the fields present in `update` on a task the caller
    /// owns. Present fields must satisfy the same constraints as
    /// creation; an empty payload is rejected outright.
    pub async fn update(
        &self,
        caller_id: Uuid,
        task_id: Uuid,
        update: TaskUpdate,
    ) -> Result<(), AppError> {
        if update.is_empty() {
            return Err(AppError::BadRequest("No data provided for update".into()));
        }
        update.validate()?;

        self.owned(caller_id, task_id).await?;

        // Ownership was just verified, so a miss here is a store fault,
        // not a caller error.
        let updated = self.tasks.update(task_id, &update).await?;
        if !updated {
            return Err(AppError::Database("Task update affected no rows".into()));
        }

        Ok(())
    }

    pub async fn delete(&self, caller_id: Uuid, task_id: Uuid) -> Result<(), AppError> {
        self.owned(caller_id, task_id).await?;

        let deleted = self.tasks.delete(task_id).await?;
        if !deleted {
            return Err(AppError::NotFound("Task not found".into()));
        }

        log::debug!("deleted task {}", task_id);

        Ok(())
    }

    /// Fetches a task and checks it belongs to `caller_id`. Missing and
    /// foreign tasks both answer not-found so existence is never leaked.
    async fn owned(&self, caller_id: Uuid, task_id: Uuid) -> Result<Task, AppError> {
        match self.tasks.get(task_id).await? {
            Some(task) if task.owner_id == caller_id => Ok(task),
            _ => Err(AppError::NotFound("Task not found".into())),
        }
    }
}
