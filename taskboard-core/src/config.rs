/// Configuration management for the core services
///
/// Configuration is loaded once at process startup and passed into each
/// component at construction. Nothing in this crate reads the environment
/// after startup and there is no process-wide mutable configuration.
///
/// # Environment Variables
///
/// - `JWT_SECRET`: secret key for session token signing (required, >= 32 chars)
/// - `TOKEN_TTL_HOURS`: session token lifetime in hours (default: 24)
///
/// # Example
///
/// ```no_run
/// use taskboard_core::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("tokens live for {} hours", config.jwt.token_ttl_hours);
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;

/// Complete core configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Session token configuration
    pub jwt: JwtConfig,
}

/// Session token configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Secret key for token signing
    ///
    /// Must be kept secret and should be at least 32 bytes.
    /// Generate with: `openssl rand -hex 32`
    pub secret: String,

    /// Token lifetime in hours
    pub token_ttl_hours: i64,
}

impl JwtConfig {
    /// Creates a token configuration with the default 24 hour lifetime
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            token_ttl_hours: 24,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `JWT_SECRET` is missing or shorter than 32 characters
    /// - `TOKEN_TTL_HOURS` is present but not a positive integer
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable is required"))?;

        if jwt_secret.len() < 32 {
            anyhow::bail!("JWT_SECRET must be at least 32 characters long");
        }

        let token_ttl_hours = env::var("TOKEN_TTL_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse::<i64>()?;

        if token_ttl_hours <= 0 {
            anyhow::bail!("TOKEN_TTL_HOURS must be a positive number of hours");
        }

        Ok(Self {
            jwt: JwtConfig {
                secret: jwt_secret,
                token_ttl_hours,
            },
        })
    }
}
