/// Error handling for the taskboard core
///
/// This module provides the unified error type returned by every core
/// service. The transport layer maps these onto its own response codes;
/// the core only distinguishes the domain error kinds.
///
/// # Taxonomy
///
/// - `Validation`: missing or malformed input, resource untouched
/// - `Auth`: bad credentials or a missing/expired/invalid token
/// - `Forbidden`: authenticated but not permitted (distinct from `Auth`)
/// - `NotFound`: a referenced id does not exist
/// - `Conflict`: duplicate membership insert
/// - `Internal`: backend failure; detail is logged here and must not be
///   surfaced to callers verbatim
///
/// All errors are terminal for the request that produced them; none are
/// retryable.

use serde::{Deserialize, Serialize};

use crate::auth::jwt::JwtError;
use crate::auth::password::PasswordError;
use crate::store::StoreError;

/// Core result type alias
pub type CoreResult<T> = Result<T, CoreError>;

/// Unified core error type
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Input validation failed; the target resource was not touched
    #[error("Validation failed: {}", format_details(.0))]
    Validation(Vec<ValidationErrorDetail>),

    /// Authentication failed (credentials or token)
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Authenticated identity is not permitted to perform the operation
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Referenced resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Operation conflicts with current state (duplicate membership)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Unrecognized internal failure; callers surface a generic message
    #[error("An internal error occurred")]
    Internal(String),
}

/// Validation error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

fn format_details(details: &[ValidationErrorDetail]) -> String {
    details
        .iter()
        .map(|d| format!("{}: {}", d.field, d.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl CoreError {
    /// Builds a single-field validation error
    ///
    /// # Example
    ///
    /// ```
    /// use taskboard_core::error::CoreError;
    ///
    /// let err = CoreError::validation("status", "unrecognized status value");
    /// assert!(matches!(err, CoreError::Validation(_)));
    /// ```
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CoreError::Validation(vec![ValidationErrorDetail {
            field: field.into(),
            message: message.into(),
        }])
    }
}

/// Convert validator derive output into validation details
impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details: Vec<ValidationErrorDetail> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| ValidationErrorDetail {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Validation failed".to_string()),
                })
            })
            .collect();
        CoreError::Validation(details)
    }
}

/// Convert store errors to core errors
///
/// Store failures are unrecognized internal failures by default. Services
/// that expect a duplicate-key outcome (duplicate registration email,
/// repeated member insert) match on `StoreError` before this conversion
/// applies.
impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        tracing::error!(error = %err, "store operation failed");
        CoreError::Internal(err.to_string())
    }
}

/// Convert token errors to core errors
impl From<JwtError> for CoreError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => CoreError::Auth("Token expired".to_string()),
            JwtError::InvalidIssuer { .. } => CoreError::Auth("Invalid token issuer".to_string()),
            JwtError::CreateError(msg) => {
                tracing::error!(error = %msg, "token creation failed");
                CoreError::Internal(msg)
            }
            _ => CoreError::Auth(format!("Invalid token: {}", err)),
        }
    }
}

/// Convert password errors to core errors
///
/// A hash that fails to parse or a hashing failure is an internal fault;
/// a plain mismatch is reported by `verify_password` as `Ok(false)` and
/// never reaches this conversion.
impl From<PasswordError> for CoreError {
    fn from(err: PasswordError) -> Self {
        tracing::error!(error = %err, "password operation failed");
        CoreError::Internal(err.to_string())
    }
}
