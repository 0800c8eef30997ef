/// Registration, login and token verification
///
/// The `Authenticator` is the entry gate of the core: every protected
/// request hands its bearer token to [`Authenticator::verify_token`] and
/// only proceeds with the resulting [`AuthContext`]. The signing secret and
/// the credential store are injected at construction; the service itself
/// holds no mutable state.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use taskboard_core::auth::authenticator::{Authenticator, RegisterRequest};
/// use taskboard_core::config::JwtConfig;
/// use taskboard_core::store::memory::MemoryStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = Arc::new(MemoryStore::new());
/// let auth = Authenticator::new(store, JwtConfig::new("a-secret-key-at-least-32-bytes!!"));
///
/// let session = auth
///     .register(RegisterRequest {
///         name: "Ada".to_string(),
///         email: "ada@example.com".to_string(),
///         password: "correct horse battery".to_string(),
///     })
///     .await?;
///
/// let ctx = auth.verify_token(&session.token)?;
/// assert_eq!(ctx.id, session.user.id);
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::auth::jwt::{self, Claims};
use crate::auth::password;
use crate::config::JwtConfig;
use crate::error::{CoreError, CoreResult};
use crate::models::user::{User, UserProfile, UserRole};
use crate::store::{StoreError, UserStore};

/// Authenticated request context
///
/// Produced by [`Authenticator::verify_token`] from the validated claims
/// and consumed by the authorization checks. It carries exactly what the
/// token proves: who the caller is and which role tier they held when the
/// token was issued.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated identity ID
    pub id: Uuid,

    /// Global role at token issue time
    pub role: UserRole,
}

impl AuthContext {
    /// Creates an auth context from validated claims
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            id: claims.sub,
            role: claims.role,
        }
    }
}

/// Register request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    pub password: String,
}

/// A successful authentication: the issued token and the identity
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Signed session token
    pub token: String,

    /// The authenticated user
    pub user: User,
}

/// Authentication service
///
/// Wraps the credential store and the token configuration. Cheap to clone;
/// all fields are shared.
#[derive(Clone)]
pub struct Authenticator {
    store: Arc<dyn UserStore>,
    jwt: JwtConfig,
}

impl Authenticator {
    /// Creates an authenticator over a credential store
    pub fn new(store: Arc<dyn UserStore>, jwt: JwtConfig) -> Self {
        Self { store, jwt }
    }

    /// Registers a new user and issues their first session token
    ///
    /// The password is hashed with argon2id before it reaches the store;
    /// the plaintext is dropped here and never logged. New accounts always
    /// get the ordinary `user` role.
    ///
    /// # Errors
    ///
    /// - `CoreError::Validation` when a field is missing or malformed, or
    ///   when the email is already registered
    /// - `CoreError::Internal` on store or hashing failure
    pub async fn register(&self, req: RegisterRequest) -> CoreResult<AuthSession> {
        req.validate()?;

        let password_hash = password::hash_password(&req.password)?;

        let user = User::new(req.name, req.email, password_hash, UserRole::User);
        let user = match self.store.insert(user).await {
            Ok(user) => user,
            Err(StoreError::Duplicate(_)) => {
                return Err(CoreError::validation("email", "Email already registered"));
            }
            Err(err) => return Err(err.into()),
        };

        tracing::info!(user = %user.id, "registered new user");

        let token = self.issue_token(&user)?;
        Ok(AuthSession { token, user })
    }

    /// Authenticates a user by email and password
    ///
    /// Unknown email and wrong password are indistinguishable in the
    /// result: both produce the same `CoreError::Auth` message, so the
    /// response cannot be used to probe which addresses have accounts.
    ///
    /// # Errors
    ///
    /// - `CoreError::Validation` on a malformed request
    /// - `CoreError::Auth` on unknown email or password mismatch
    pub async fn login(&self, req: LoginRequest) -> CoreResult<AuthSession> {
        req.validate()?;

        let user = self
            .store
            .find_by_email(&req.email)
            .await?
            .ok_or_else(|| CoreError::Auth("Invalid email or password".to_string()))?;

        let valid = password::verify_password(&req.password, &user.password_hash)?;
        if !valid {
            return Err(CoreError::Auth("Invalid email or password".to_string()));
        }

        tracing::debug!(user = %user.id, "login succeeded");

        let token = self.issue_token(&user)?;
        Ok(AuthSession { token, user })
    }

    /// Issues a signed session token for an identity
    pub fn issue_token(&self, user: &User) -> CoreResult<String> {
        let claims = Claims::new(user.id, user.role, self.jwt.token_ttl_hours);
        Ok(jwt::create_token(&claims, &self.jwt.secret)?)
    }

    /// Verifies a session token and returns the authenticated context
    ///
    /// Pure and synchronous: signature, expiry, not-before and issuer are
    /// checked against the token alone, with no store access. Callers
    /// short-circuit on failure and must not process the request further.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Auth` for missing, expired or tampered tokens.
    pub fn verify_token(&self, token: &str) -> CoreResult<AuthContext> {
        let claims = jwt::validate_token(token, &self.jwt.secret)?;
        Ok(AuthContext::from_claims(&claims))
    }

    /// Lists all registered users as outward profiles
    ///
    /// Available to any authenticated caller; there is no read filtering.
    pub async fn list_users(&self, _auth: &AuthContext) -> CoreResult<Vec<UserProfile>> {
        let users = self.store.list().await?;
        Ok(users.iter().map(UserProfile::from).collect())
    }

    /// Looks up one user profile by id
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` when no user has the given id.
    pub async fn get_user(&self, _auth: &AuthContext, id: Uuid) -> CoreResult<UserProfile> {
        let user = self
            .store
            .find(id)
            .await?
            .ok_or_else(|| CoreError::NotFound("User not found".to_string()))?;
        Ok(UserProfile::from(&user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    fn authenticator() -> Authenticator {
        Authenticator::new(
            Arc::new(MemoryStore::new()),
            JwtConfig::new("test-secret-key-at-least-32-bytes-long"),
        )
    }

    fn register_req(email: &str) -> RegisterRequest {
        RegisterRequest {
            name: "Test User".to_string(),
            email: email.to_string(),
            password: "a sufficiently long password".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_issues_verifiable_token() {
        let auth = authenticator();
        let session = auth.register(register_req("ada@example.com")).await.unwrap();

        let ctx = auth.verify_token(&session.token).unwrap();
        assert_eq!(ctx.id, session.user.id);
        assert_eq!(ctx.role, UserRole::User);
    }

    #[tokio::test]
    async fn test_register_rejects_missing_fields() {
        let auth = authenticator();

        let result = auth
            .register(RegisterRequest {
                name: String::new(),
                email: "not-an-email".to_string(),
                password: "short".to_string(),
            })
            .await;

        match result {
            Err(CoreError::Validation(details)) => {
                let fields: Vec<&str> = details.iter().map(|d| d.field.as_str()).collect();
                assert!(fields.contains(&"name"));
                assert!(fields.contains(&"email"));
                assert!(fields.contains(&"password"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_register_duplicate_email_is_validation_error() {
        let auth = authenticator();
        auth.register(register_req("ada@example.com")).await.unwrap();

        let result = auth.register(register_req("ada@example.com")).await;
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[tokio::test]
    async fn test_login_failures_are_uniform() {
        let auth = authenticator();
        auth.register(register_req("ada@example.com")).await.unwrap();

        let unknown = auth
            .login(LoginRequest {
                email: "nobody@example.com".to_string(),
                password: "a sufficiently long password".to_string(),
            })
            .await
            .unwrap_err();

        let wrong = auth
            .login(LoginRequest {
                email: "ada@example.com".to_string(),
                password: "not the right password".to_string(),
            })
            .await
            .unwrap_err();

        // Same kind, same message: no account enumeration through errors.
        assert_eq!(unknown.to_string(), wrong.to_string());
        assert!(matches!(unknown, CoreError::Auth(_)));
        assert!(matches!(wrong, CoreError::Auth(_)));
    }

    #[tokio::test]
    async fn test_verify_rejects_foreign_signature() {
        let auth = authenticator();
        let session = auth.register(register_req("ada@example.com")).await.unwrap();

        let other = Authenticator::new(
            Arc::new(MemoryStore::new()),
            JwtConfig::new("another-secret-key-at-least-32-bytes"),
        );

        assert!(matches!(
            other.verify_token(&session.token),
            Err(CoreError::Auth(_))
        ));
    }
}
