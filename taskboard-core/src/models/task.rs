/// Task model and status workflow
///
/// Tasks belong to a project and move through a three-column board:
///
/// ```text
/// todo → inprogress → completed
/// ```
///
/// The board UI advances one column at a time; the core validates only that
/// a submitted status is one of the recognized values. Any recognized status
/// is accepted from any current status, so moving a card straight from
/// `todo` to `completed` is allowed here.
///
/// # Example
///
/// ```
/// use taskboard_core::models::task::TaskStatus;
///
/// assert_eq!(TaskStatus::parse("inprogress"), Some(TaskStatus::InProgress));
/// assert_eq!(TaskStatus::parse("Done"), None);
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Task status, one board column per value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Not started
    Todo,

    /// Being worked on
    InProgress,

    /// Finished
    Completed,
}

impl TaskStatus {
    /// Converts status to its wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "inprogress",
            TaskStatus::Completed => "completed",
        }
    }

    /// Parses a case-sensitive status literal
    ///
    /// Exactly `"todo"`, `"inprogress"` and `"completed"` are recognized;
    /// anything else yields `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "todo" => Some(TaskStatus::Todo),
            "inprogress" => Some(TaskStatus::InProgress),
            "completed" => Some(TaskStatus::Completed),
            _ => None,
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Todo
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    /// Low priority
    Low,

    /// Medium priority (the default)
    Medium,

    /// High priority
    High,
}

impl TaskPriority {
    /// Converts priority to its wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }
}

impl Default for TaskPriority {
    fn default() -> Self {
        TaskPriority::Medium
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Task model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Task title
    pub title: String,

    /// Task description (empty when not provided)
    pub description: String,

    /// Project this task belongs to
    ///
    /// Validated against an existing project at creation time only; a
    /// deleted project leaves this as a dangling reference.
    pub project_id: Uuid,

    /// Identity the task is assigned to, if any
    pub assigned_to: Option<Uuid>,

    /// Current board column
    pub status: TaskStatus,

    /// Priority
    pub priority: TaskPriority,

    /// Optional deadline
    pub deadline: Option<DateTime<Utc>>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task in the `todo` column
    ///
    /// Priority defaults to `medium` when the caller supplies none.
    pub fn new(data: CreateTask) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: data.title,
            description: data.description.unwrap_or_default(),
            project_id: data.project_id,
            assigned_to: data.assigned_to,
            status: TaskStatus::default(),
            priority: data.priority.unwrap_or_default(),
            deadline: data.deadline,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a partial update
    ///
    /// Merge-if-present semantics: `None` fields and empty strings leave the
    /// stored value unchanged. A caller cannot clear `assigned_to` or
    /// `deadline` through this path; absence means "keep".
    pub fn apply(&mut self, patch: UpdateTask) {
        if let Some(title) = patch.title {
            if !title.is_empty() {
                self.title = title;
            }
        }
        if let Some(description) = patch.description {
            if !description.is_empty() {
                self.description = description;
            }
        }
        if let Some(assigned_to) = patch.assigned_to {
            self.assigned_to = Some(assigned_to);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(deadline) = patch.deadline {
            self.deadline = Some(deadline);
        }
        self.updated_at = Utc::now();
    }
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Task title (required)
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Project the task belongs to (must exist)
    pub project_id: Uuid,

    /// Optional assignee
    pub assigned_to: Option<Uuid>,

    /// Priority; defaults to `medium`
    pub priority: Option<TaskPriority>,

    /// Optional deadline
    pub deadline: Option<DateTime<Utc>>,
}

/// Input for updating an existing task
///
/// All fields are optional. Only present, non-empty fields overwrite the
/// stored values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    /// New title
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New assignee
    pub assigned_to: Option<Uuid>,

    /// New status
    pub status: Option<TaskStatus>,

    /// New priority
    pub priority: Option<TaskPriority>,

    /// New deadline
    pub deadline: Option<DateTime<Utc>>,
}
