/// Common test utilities for integration tests
///
/// Wires the in-memory store into the three core services the way an
/// embedding binary would: one store, one authenticator, one service per
/// aggregate, all sharing the same signing configuration.

use std::sync::Arc;

use taskboard_core::auth::authenticator::{
    AuthContext, AuthSession, Authenticator, RegisterRequest,
};
use taskboard_core::config::JwtConfig;
use taskboard_core::models::user::{User, UserRole};
use taskboard_core::projects::ProjectService;
use taskboard_core::store::memory::MemoryStore;
use taskboard_core::store::UserStore;
use taskboard_core::tasks::TaskService;

pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-bytes";

/// Test context containing the wired core services
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub auth: Authenticator,
    pub projects: ProjectService,
    pub tasks: TaskService,
}

impl TestContext {
    /// Creates a fresh context over an empty store
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let auth = Authenticator::new(store.clone(), JwtConfig::new(TEST_SECRET));
        let projects = ProjectService::new(store.clone());
        let tasks = TaskService::new(store.clone(), store.clone());

        Self {
            store,
            auth,
            projects,
            tasks,
        }
    }

    /// Registers an ordinary user and returns their session
    pub async fn register(&self, name: &str, email: &str) -> AuthSession {
        self.auth
            .register(RegisterRequest {
                name: name.to_string(),
                email: email.to_string(),
                password: format!("{}-test-password", name),
            })
            .await
            .expect("registration should succeed")
    }

    /// Registers a user and resolves their authenticated context
    pub async fn register_ctx(&self, name: &str, email: &str) -> AuthContext {
        let session = self.register(name, email).await;
        self.auth
            .verify_token(&session.token)
            .expect("fresh token should verify")
    }

    /// Creates an admin account directly in the store and returns its
    /// authenticated context
    ///
    /// Registration only produces ordinary users; promoting an account is
    /// an operational concern outside the core, so tests seed admins at
    /// the store level.
    pub async fn seed_admin(&self, email: &str) -> AuthContext {
        let admin = User::new(
            "Admin".to_string(),
            email.to_string(),
            "unused-hash".to_string(),
            UserRole::Admin,
        );
        let admin = self
            .store
            .insert(admin)
            .await
            .expect("admin insert should succeed");

        let token = self
            .auth
            .issue_token(&admin)
            .expect("token issue should succeed");
        self.auth
            .verify_token(&token)
            .expect("admin token should verify")
    }
}
