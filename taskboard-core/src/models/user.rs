/// User model and role tier
///
/// Users are the authenticated principals of the system. There is a single
/// global role tier: `admin` grants elevated mutation rights over projects,
/// everyone else is an ordinary `user`.
///
/// Passwords are stored as argon2id hashes, never in plaintext, and the
/// hash never leaves the core: `User` skips it on serialization and the
/// outward record is [`UserProfile`].
///
/// # Example
///
/// ```
/// use taskboard_core::models::user::{User, UserProfile, UserRole};
///
/// let user = User::new(
///     "Ada".to_string(),
///     "ada@example.com".to_string(),
///     "$argon2id$...".to_string(),
///     UserRole::User,
/// );
///
/// let profile = UserProfile::from(&user);
/// assert_eq!(profile.email, "ada@example.com");
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Global role tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Ordinary user
    User,

    /// Administrator: may modify and delete any project
    Admin,
}

impl UserRole {
    /// Converts role to its wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }

    /// Checks whether this role is the admin tier
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::User
    }
}

/// User model representing an account
///
/// The email address is unique across all users (case-insensitive, the way
/// a CITEXT column would treat it).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID (UUID v4)
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address, unique across all users
    pub email: String,

    /// Argon2id password hash
    ///
    /// Never serialized outward; use [`UserProfile`] for responses.
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Global role
    pub role: UserRole,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with a fresh id and current timestamps
    pub fn new(name: String, email: String, password_hash: String, role: UserRole) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            role,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Outward-facing user record
///
/// This is the only shape in which a credential record crosses the core
/// boundary; it carries no secret material.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// User ID
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Global role
    pub role: UserRole,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_strings() {
        assert_eq!(UserRole::User.as_str(), "user");
        assert_eq!(UserRole::Admin.as_str(), "admin");
        assert_eq!(
            serde_json::to_string(&UserRole::Admin).unwrap(),
            "\"admin\""
        );
    }

    #[test]
    fn test_default_role_is_user() {
        assert_eq!(UserRole::default(), UserRole::User);
        assert!(!UserRole::default().is_admin());
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let user = User::new(
            "Test".to_string(),
            "test@example.com".to_string(),
            "$argon2id$secret-hash".to_string(),
            UserRole::User,
        );

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("secret-hash"));

        let profile_json = serde_json::to_string(&UserProfile::from(&user)).unwrap();
        assert!(!profile_json.contains("secret-hash"));
        assert!(profile_json.contains("test@example.com"));
    }
}
