/// In-memory reference adapter for the storage ports
///
/// Thread-safe maps behind a single `RwLock`. Every port operation takes
/// the lock once and releases it before returning, which makes each call an
/// atomic per-document read-modify-write — including the conditional member
/// append, where the membership check and the push happen under the same
/// write guard.
///
/// This adapter backs the test suite; production deployments implement the
/// ports against a real backend.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::models::project::Project;
use crate::models::task::Task;
use crate::models::user::User;
use crate::store::{
    MemberInsert, ProjectStore, StoreError, StoreResult, TaskStore, UserStore,
};

/// Thread-safe in-memory store implementing all three ports
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    users: HashMap<Uuid, User>,
    /// Unique email index, keyed lowercase
    email_index: HashMap<String, Uuid>,
    projects: HashMap<Uuid, Project>,
    tasks: HashMap<Uuid, Task>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, MemoryState>> {
        self.state
            .read()
            .map_err(|err| StoreError::Backend(err.to_string()))
    }

    fn write(&self) -> StoreResult<std::sync::RwLockWriteGuard<'_, MemoryState>> {
        self.state
            .write()
            .map_err(|err| StoreError::Backend(err.to_string()))
    }
}

fn email_key(email: &str) -> String {
    email.to_lowercase()
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert(&self, user: User) -> StoreResult<User> {
        let mut state = self.write()?;
        let key = email_key(&user.email);
        if state.email_index.contains_key(&key) {
            return Err(StoreError::Duplicate(format!("users.email: {}", user.email)));
        }
        state.email_index.insert(key, user.id);
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.read()?.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let state = self.read()?;
        Ok(state
            .email_index
            .get(&email_key(email))
            .and_then(|id| state.users.get(id))
            .cloned())
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        let mut users: Vec<User> = self.read()?.users.values().cloned().collect();
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn insert(&self, project: Project) -> StoreResult<Project> {
        self.write()?.projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn find(&self, id: Uuid) -> StoreResult<Option<Project>> {
        Ok(self.read()?.projects.get(&id).cloned())
    }

    async fn save(&self, project: Project) -> StoreResult<Project> {
        self.write()?.projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.write()?.projects.remove(&id).is_some())
    }

    async fn list(&self) -> StoreResult<Vec<Project>> {
        let mut projects: Vec<Project> = self.read()?.projects.values().cloned().collect();
        projects.sort_by_key(|p| p.created_at);
        Ok(projects)
    }

    async fn add_member_if_absent(
        &self,
        project_id: Uuid,
        member_id: Uuid,
    ) -> StoreResult<MemberInsert> {
        // Check and append under one write guard: this is the single
        // conditional update the port contract requires.
        let mut state = self.write()?;
        let Some(project) = state.projects.get_mut(&project_id) else {
            return Ok(MemberInsert::MissingProject);
        };

        if project.members.contains(&member_id) {
            return Ok(MemberInsert::AlreadyMember);
        }

        project.members.push(member_id);
        project.updated_at = chrono::Utc::now();
        Ok(MemberInsert::Added(project.clone()))
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn insert(&self, task: Task) -> StoreResult<Task> {
        self.write()?.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn find(&self, id: Uuid) -> StoreResult<Option<Task>> {
        Ok(self.read()?.tasks.get(&id).cloned())
    }

    async fn save(&self, task: Task) -> StoreResult<Task> {
        self.write()?.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.write()?.tasks.remove(&id).is_some())
    }

    async fn list(&self) -> StoreResult<Vec<Task>> {
        let mut tasks: Vec<Task> = self.read()?.tasks.values().cloned().collect();
        tasks.sort_by_key(|t| t.created_at);
        Ok(tasks)
    }

    async fn list_by_project(&self, project_id: Uuid) -> StoreResult<Vec<Task>> {
        let mut tasks: Vec<Task> = self
            .read()?
            .tasks
            .values()
            .filter(|t| t.project_id == project_id)
            .cloned()
            .collect();
        tasks.sort_by_key(|t| t.created_at);
        Ok(tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::project::CreateProject;
    use crate::models::user::UserRole;

    fn user(email: &str) -> User {
        User::new(
            "Test".to_string(),
            email.to_string(),
            "hash".to_string(),
            UserRole::User,
        )
    }

    #[tokio::test]
    async fn test_email_unique_case_insensitive() {
        let store = MemoryStore::new();
        UserStore::insert(&store, user("ada@example.com")).await.unwrap();

        let err = UserStore::insert(&store, user("ADA@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));

        let found = store.find_by_email("Ada@Example.Com").await.unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn test_add_member_if_absent_outcomes() {
        let store = MemoryStore::new();
        let creator = Uuid::new_v4();
        let candidate = Uuid::new_v4();
        let project = Project::new(
            CreateProject {
                title: "Board".to_string(),
                ..Default::default()
            },
            creator,
        );
        let project_id = project.id;
        ProjectStore::insert(&store, project).await.unwrap();

        match store.add_member_if_absent(project_id, candidate).await.unwrap() {
            MemberInsert::Added(p) => assert_eq!(p.members.len(), 2),
            other => panic!("expected Added, got {:?}", other),
        }

        assert!(matches!(
            store.add_member_if_absent(project_id, candidate).await.unwrap(),
            MemberInsert::AlreadyMember
        ));

        assert!(matches!(
            store.add_member_if_absent(Uuid::new_v4(), candidate).await.unwrap(),
            MemberInsert::MissingProject
        ));
    }

    #[tokio::test]
    async fn test_concurrent_member_insert_single_winner() {
        let store = MemoryStore::new();
        let creator = Uuid::new_v4();
        let candidate = Uuid::new_v4();
        let project = Project::new(
            CreateProject {
                title: "Board".to_string(),
                ..Default::default()
            },
            creator,
        );
        let project_id = project.id;
        ProjectStore::insert(&store, project).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.add_member_if_absent(project_id, candidate).await
            }));
        }

        let mut added = 0;
        for handle in handles {
            if let MemberInsert::Added(_) = handle.await.unwrap().unwrap() {
                added += 1;
            }
        }

        assert_eq!(added, 1);
        let project = ProjectStore::find(&store, project_id).await.unwrap().unwrap();
        assert_eq!(project.members.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_reports_presence() {
        let store = MemoryStore::new();
        let project = Project::new(
            CreateProject {
                title: "Board".to_string(),
                ..Default::default()
            },
            Uuid::new_v4(),
        );
        let id = project.id;
        ProjectStore::insert(&store, project).await.unwrap();

        assert!(ProjectStore::delete(&store, id).await.unwrap());
        assert!(!ProjectStore::delete(&store, id).await.unwrap());
    }
}
