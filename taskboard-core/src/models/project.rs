/// Project model and input types
///
/// A project groups tasks and carries a member set. `created_by` is the
/// owning identity; the owner is implicitly a member and is not required to
/// appear in `members`. The member list never contains duplicates.
///
/// Member ids are non-owning references into the credential store: they are
/// resolved by lookup and are not validated at insertion time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Project model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Unique project ID
    pub id: Uuid,

    /// Project title
    pub title: String,

    /// Project description (empty when not provided)
    pub description: String,

    /// Identity that created the project (the owner)
    pub created_by: Uuid,

    /// Member identities, duplicate-free
    pub members: Vec<Uuid>,

    /// When the project was created
    pub created_at: DateTime<Utc>,

    /// When the project was last updated
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Creates a new project owned by `created_by`
    ///
    /// When the caller supplies no member list the creator becomes the sole
    /// initial member. A supplied list is deduplicated, first occurrence
    /// wins.
    pub fn new(data: CreateProject, created_by: Uuid) -> Self {
        let members = data
            .members
            .map(dedup_members)
            .unwrap_or_else(|| vec![created_by]);

        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: data.title,
            description: data.description.unwrap_or_default(),
            created_by,
            members,
            created_at: now,
            updated_at: now,
        }
    }

    /// Checks whether an identity appears in the member list
    ///
    /// The owner is implicitly a member but is not required to appear here.
    pub fn has_member(&self, id: Uuid) -> bool {
        self.members.contains(&id)
    }

    /// Applies a partial update
    ///
    /// Merge-if-present semantics: `None` fields and empty strings leave the
    /// stored value unchanged, so this path cannot clear a field. A present
    /// member list replaces the whole set (deduplicated), including
    /// replacement by an empty list.
    pub fn apply(&mut self, patch: UpdateProject) {
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
        if let Some(members) = patch.members {
            self.members = dedup_members(members);
        }
        self.updated_at = Utc::now();
    }
}

/// Input for creating a new project
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateProject {
    /// Project title (required)
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Optional initial member list; defaults to the creator
    pub members: Option<Vec<Uuid>>,
}

/// Input for updating an existing project
///
/// All fields are optional. Only present, non-empty fields overwrite the
/// stored values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProject {
    /// New title
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,

    /// Replacement member list
    pub members: Option<Vec<Uuid>>,
}

/// Removes duplicate member ids, first occurrence wins
fn dedup_members(members: Vec<Uuid>) -> Vec<Uuid> {
    let mut seen = std::collections::HashSet::new();
    members.into_iter().filter(|id| seen.insert(*id)).collect()
}
