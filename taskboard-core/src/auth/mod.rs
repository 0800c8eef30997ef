/// Authentication for taskboard
///
/// This module provides the credential-handling primitives and the
/// [`authenticator::Authenticator`] service built on top of them:
///
/// # Modules
///
/// - [`password`]: argon2id password hashing and verification
/// - [`jwt`]: session token generation and validation
/// - [`authenticator`]: registration, login and token verification
///
/// # Security Properties
///
/// - Passwords are hashed with argon2id and a random per-password salt;
///   plaintext is never stored or logged
/// - Session tokens are HS256-signed and carry identity id, role and expiry
/// - Login failures are uniform: unknown email and wrong password produce
///   the same error, so responses cannot be used to enumerate accounts

pub mod authenticator;
pub mod jwt;
pub mod password;
