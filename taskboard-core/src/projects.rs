/// Project operations and membership management
///
/// `ProjectService` owns every project mutation. Creation is open to any
/// authenticated identity and makes the creator the owner; update and
/// delete are gated by the authorization engine (owner or admin);
/// membership grows through an atomic conditional append and never shrinks
/// (there is no remove-member operation).

use std::sync::Arc;
use uuid::Uuid;

use crate::auth::authenticator::AuthContext;
use crate::authz;
use crate::error::{CoreError, CoreResult};
use crate::models::project::{CreateProject, Project, UpdateProject};
use crate::store::{MemberInsert, ProjectStore};

/// Project service
#[derive(Clone)]
pub struct ProjectService {
    store: Arc<dyn ProjectStore>,
}

impl ProjectService {
    /// Creates a project service over a project store
    pub fn new(store: Arc<dyn ProjectStore>) -> Self {
        Self { store }
    }

    /// Creates a project owned by the caller
    ///
    /// The caller becomes `created_by`; when no member list is supplied the
    /// caller is the sole initial member. Member ids are not resolved
    /// against the credential store.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` when the title is empty.
    pub async fn create(&self, auth: &AuthContext, data: CreateProject) -> CoreResult<Project> {
        if data.title.is_empty() {
            return Err(CoreError::validation("title", "Title is required"));
        }

        let project = Project::new(data, auth.id);
        let project = self.store.insert(project).await?;

        tracing::info!(project = %project.id, owner = %auth.id, "created project");
        Ok(project)
    }

    /// Fetches one project
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` when no project has the given id.
    pub async fn get(&self, _auth: &AuthContext, id: Uuid) -> CoreResult<Project> {
        self.store
            .find(id)
            .await?
            .ok_or_else(|| CoreError::NotFound("Project not found".to_string()))
    }

    /// Lists all projects
    ///
    /// Reads are unrestricted: every authenticated identity sees every
    /// project.
    pub async fn list(&self, _auth: &AuthContext) -> CoreResult<Vec<Project>> {
        Ok(self.store.list().await?)
    }

    /// Updates a project's title, description or member list
    ///
    /// Owner or admin only. Merge-if-present: absent and empty string
    /// fields keep their stored values; a present member list replaces the
    /// whole set.
    ///
    /// # Errors
    ///
    /// - `CoreError::NotFound` when the project does not exist
    /// - `CoreError::Forbidden` when the caller is neither owner nor admin
    pub async fn update(
        &self,
        auth: &AuthContext,
        id: Uuid,
        patch: UpdateProject,
    ) -> CoreResult<Project> {
        let mut project = self.get(auth, id).await?;

        authz::require_modify(auth, &project, "update this project")?;

        project.apply(patch);
        let project = self.store.save(project).await?;

        tracing::debug!(project = %project.id, user = %auth.id, "updated project");
        Ok(project)
    }

    /// Deletes a project
    ///
    /// Owner or admin only. Tasks referencing the project are left in
    /// place with a dangling `project_id` — there is no cascade delete, and
    /// readers must treat the reference as non-owning.
    ///
    /// # Errors
    ///
    /// - `CoreError::NotFound` when the project does not exist
    /// - `CoreError::Forbidden` when the caller is neither owner nor admin
    pub async fn delete(&self, auth: &AuthContext, id: Uuid) -> CoreResult<()> {
        let project = self.get(auth, id).await?;

        authz::require_modify(auth, &project, "delete this project")?;

        let deleted = self.store.delete(id).await?;
        if !deleted {
            // Raced with another delete between the fetch and the remove.
            return Err(CoreError::NotFound("Project not found".to_string()));
        }

        tracing::info!(project = %id, user = %auth.id, "deleted project");
        Ok(())
    }

    /// Adds a member to a project
    ///
    /// Open to any authenticated identity; the owner/admin gate covers
    /// `update` and `delete` only. A repeat insert of the same candidate is
    /// rejected rather than silently accepted — the duplicate signals a
    /// caller error. The check and the append are one atomic conditional
    /// update in the store, so concurrent calls cannot insert twice.
    ///
    /// The candidate id is not validated against the credential store.
    ///
    /// # Errors
    ///
    /// - `CoreError::NotFound` when the project does not exist
    /// - `CoreError::Conflict` when the candidate is already a member
    pub async fn add_member(
        &self,
        auth: &AuthContext,
        project_id: Uuid,
        member_id: Uuid,
    ) -> CoreResult<Project> {
        match self.store.add_member_if_absent(project_id, member_id).await? {
            MemberInsert::Added(project) => {
                tracing::debug!(
                    project = %project.id,
                    member = %member_id,
                    user = %auth.id,
                    "added project member"
                );
                Ok(project)
            }
            MemberInsert::AlreadyMember => Err(CoreError::Conflict(
                "Member already in project".to_string(),
            )),
            MemberInsert::MissingProject => {
                Err(CoreError::NotFound("Project not found".to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::UserRole;
    use crate::store::memory::MemoryStore;

    fn service() -> ProjectService {
        ProjectService::new(Arc::new(MemoryStore::new()))
    }

    fn ctx(role: UserRole) -> AuthContext {
        AuthContext {
            id: Uuid::new_v4(),
            role,
        }
    }

    fn create_input(title: &str) -> CreateProject {
        CreateProject {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_requires_title() {
        let service = service();
        let result = service.create(&ctx(UserRole::User), create_input("")).await;
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[tokio::test]
    async fn test_creator_becomes_owner_and_member() {
        let service = service();
        let owner = ctx(UserRole::User);

        let project = service.create(&owner, create_input("Board")).await.unwrap();
        assert_eq!(project.created_by, owner.id);
        assert_eq!(project.members, vec![owner.id]);
    }

    #[tokio::test]
    async fn test_update_gated_by_ownership() {
        let service = service();
        let owner = ctx(UserRole::User);
        let stranger = ctx(UserRole::User);
        let admin = ctx(UserRole::Admin);

        let project = service.create(&owner, create_input("Board")).await.unwrap();

        let patch = UpdateProject {
            title: Some("Renamed".to_string()),
            ..Default::default()
        };

        let err = service
            .update(&stranger, project.id, patch.clone())
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Forbidden(_)));

        let updated = service.update(&admin, project.id, patch).await.unwrap();
        assert_eq!(updated.title, "Renamed");
    }

    #[tokio::test]
    async fn test_repeat_add_member_conflicts() {
        let service = service();
        let owner = ctx(UserRole::User);
        let candidate = Uuid::new_v4();

        let project = service.create(&owner, create_input("Board")).await.unwrap();

        let updated = service
            .add_member(&owner, project.id, candidate)
            .await
            .unwrap();
        assert_eq!(updated.members.len(), 2);

        let err = service
            .add_member(&owner, project.id, candidate)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));

        let unchanged = service.get(&owner, project.id).await.unwrap();
        assert_eq!(unchanged.members.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_leaves_no_project() {
        let service = service();
        let owner = ctx(UserRole::User);

        let project = service.create(&owner, create_input("Board")).await.unwrap();
        service.delete(&owner, project.id).await.unwrap();

        let err = service.get(&owner, project.id).await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }
}
