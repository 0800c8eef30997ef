/// Task operations and the status workflow
///
/// `TaskService` owns every task mutation. Unlike projects, tasks carry no
/// ownership gate: any identity holding a valid session may update,
/// re-status or delete any task. That asymmetry is part of the service's
/// compatibility contract and is documented on each operation it affects.
///
/// Status changes go through [`TaskService::set_status`], which validates
/// the submitted literal and nothing else — the board's column order is a
/// UI convention, not a core invariant.

use std::sync::Arc;
use uuid::Uuid;

use crate::auth::authenticator::AuthContext;
use crate::error::{CoreError, CoreResult};
use crate::models::task::{CreateTask, Task, TaskStatus, UpdateTask};
use crate::store::{ProjectStore, TaskStore};

/// Task service
#[derive(Clone)]
pub struct TaskService {
    tasks: Arc<dyn TaskStore>,
    projects: Arc<dyn ProjectStore>,
}

impl TaskService {
    /// Creates a task service over the task and project stores
    ///
    /// The project store is consulted only at task creation, to check that
    /// the referenced project exists.
    pub fn new(tasks: Arc<dyn TaskStore>, projects: Arc<dyn ProjectStore>) -> Self {
        Self { tasks, projects }
    }

    /// Creates a task in the referenced project
    ///
    /// New tasks start in the `todo` column; priority defaults to
    /// `medium`. The project reference is validated here and never again —
    /// later project deletion leaves the task with a dangling reference.
    ///
    /// # Errors
    ///
    /// - `CoreError::Validation` when the title is empty
    /// - `CoreError::NotFound` when the referenced project does not exist
    pub async fn create(&self, auth: &AuthContext, data: CreateTask) -> CoreResult<Task> {
        if data.title.is_empty() {
            return Err(CoreError::validation("title", "Title is required"));
        }

        let project = self.projects.find(data.project_id).await?;
        if project.is_none() {
            return Err(CoreError::NotFound("Project not found".to_string()));
        }

        let task = Task::new(data);
        let task = self.tasks.insert(task).await?;

        tracing::info!(task = %task.id, project = %task.project_id, user = %auth.id, "created task");
        Ok(task)
    }

    /// Fetches one task
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` when no task has the given id.
    pub async fn get(&self, _auth: &AuthContext, id: Uuid) -> CoreResult<Task> {
        self.tasks
            .find(id)
            .await?
            .ok_or_else(|| CoreError::NotFound("Task not found".to_string()))
    }

    /// Lists all tasks
    pub async fn list(&self, _auth: &AuthContext) -> CoreResult<Vec<Task>> {
        Ok(self.tasks.list().await?)
    }

    /// Lists the tasks of one project
    ///
    /// An unknown project id yields an empty list, not an error — the
    /// project reference is not re-validated after creation.
    pub async fn list_by_project(
        &self,
        _auth: &AuthContext,
        project_id: Uuid,
    ) -> CoreResult<Vec<Task>> {
        Ok(self.tasks.list_by_project(project_id).await?)
    }

    /// Applies a partial update to a task
    ///
    /// Open to any authenticated identity. Merge-if-present: absent and
    /// empty string fields keep their stored values, so this path cannot
    /// clear a field.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` when the task does not exist.
    pub async fn update(
        &self,
        auth: &AuthContext,
        id: Uuid,
        patch: UpdateTask,
    ) -> CoreResult<Task> {
        let mut task = self.get(auth, id).await?;

        task.apply(patch);
        let task = self.tasks.save(task).await?;

        tracing::debug!(task = %task.id, user = %auth.id, "updated task");
        Ok(task)
    }

    /// Moves a task to another board column
    ///
    /// The submitted value must be one of the case-sensitive literals
    /// `"todo"`, `"inprogress"` or `"completed"`; anything else is rejected
    /// and the task is untouched. The current column places no restriction
    /// on the target — moving straight from `todo` to `completed` is
    /// accepted.
    ///
    /// # Errors
    ///
    /// - `CoreError::Validation` on an unrecognized status literal
    /// - `CoreError::NotFound` when the task does not exist
    pub async fn set_status(
        &self,
        auth: &AuthContext,
        id: Uuid,
        status: &str,
    ) -> CoreResult<Task> {
        let Some(status) = TaskStatus::parse(status) else {
            return Err(CoreError::validation("status", "Invalid status"));
        };

        let mut task = self.get(auth, id).await?;

        task.apply(UpdateTask {
            status: Some(status),
            ..Default::default()
        });
        let task = self.tasks.save(task).await?;

        tracing::debug!(task = %task.id, status = %status, user = %auth.id, "moved task");
        Ok(task)
    }

    /// Deletes a task
    ///
    /// Open to any authenticated identity; there is no ownership check on
    /// tasks.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` when the task does not exist.
    pub async fn delete(&self, auth: &AuthContext, id: Uuid) -> CoreResult<()> {
        let deleted = self.tasks.delete(id).await?;
        if !deleted {
            return Err(CoreError::NotFound("Task not found".to_string()));
        }

        tracing::info!(task = %id, user = %auth.id, "deleted task");
        Ok(())
    }
}
