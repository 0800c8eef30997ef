/// Storage ports for the core services
///
/// The core depends on storage, it does not implement a database. Each
/// aggregate gets its own async port; backends implement them against
/// whatever engine they like. Every operation touches exactly one document
/// and is assumed durable and immediately consistent for that document —
/// no multi-document transactions are required anywhere in the core.
///
/// The one operation with a stronger contract is
/// [`ProjectStore::add_member_if_absent`]: the membership check and the
/// append must be a single conditional update, never a separate
/// read-compare-write, so concurrent inserts of the same candidate cannot
/// both succeed.
///
/// [`memory::MemoryStore`] is the bundled reference adapter; it backs the
/// test suite and demonstrates the atomicity contract.

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::project::Project;
use crate::models::task::Task;
use crate::models::user::User;

pub mod memory;

/// Storage error types
///
/// Backends report duplicate-key outcomes distinctly so services can map
/// them onto domain errors; everything else is an opaque backend failure.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique constraint rejected the write
    #[error("Duplicate key: {0}")]
    Duplicate(String),

    /// The backend failed
    #[error("Storage backend failure: {0}")]
    Backend(String),
}

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Outcome of the conditional member append
#[derive(Debug, Clone)]
pub enum MemberInsert {
    /// Member appended; carries the updated project
    Added(Project),

    /// Candidate was already in the member list; nothing written
    AlreadyMember,

    /// No project with the given id
    MissingProject,
}

/// Port for the credential store
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a new user
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Duplicate` when the email is already registered
    /// (emails compare case-insensitively).
    async fn insert(&self, user: User) -> StoreResult<User>;

    /// Finds a user by id
    async fn find(&self, id: Uuid) -> StoreResult<Option<User>>;

    /// Finds a user by email, case-insensitively
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Lists all users
    async fn list(&self) -> StoreResult<Vec<User>>;
}

/// Port for the project store
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Inserts a new project
    async fn insert(&self, project: Project) -> StoreResult<Project>;

    /// Finds a project by id
    async fn find(&self, id: Uuid) -> StoreResult<Option<Project>>;

    /// Saves the full state of an existing project
    async fn save(&self, project: Project) -> StoreResult<Project>;

    /// Deletes a project by id
    ///
    /// Returns `true` when a project was deleted, `false` when no project
    /// had the given id. Tasks referencing the project are not touched.
    async fn delete(&self, id: Uuid) -> StoreResult<bool>;

    /// Lists all projects
    async fn list(&self) -> StoreResult<Vec<Project>>;

    /// Appends a member to the project's member list only if absent
    ///
    /// Check and append are one atomic conditional update; under concurrent
    /// calls for the same candidate exactly one caller observes
    /// [`MemberInsert::Added`].
    async fn add_member_if_absent(
        &self,
        project_id: Uuid,
        member_id: Uuid,
    ) -> StoreResult<MemberInsert>;
}

/// Port for the task store
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Inserts a new task
    async fn insert(&self, task: Task) -> StoreResult<Task>;

    /// Finds a task by id
    async fn find(&self, id: Uuid) -> StoreResult<Option<Task>>;

    /// Saves the full state of an existing task
    async fn save(&self, task: Task) -> StoreResult<Task>;

    /// Deletes a task by id
    ///
    /// Returns `true` when a task was deleted, `false` otherwise.
    async fn delete(&self, id: Uuid) -> StoreResult<bool>;

    /// Lists all tasks
    async fn list(&self) -> StoreResult<Vec<Task>>;

    /// Lists the tasks belonging to one project
    async fn list_by_project(&self, project_id: Uuid) -> StoreResult<Vec<Task>>;
}
