//! Authentication and brute-force protection configuration

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

const DEFAULT_JWT_SECRET: &str = "development-secret-please-change-in-production";

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,

    /// Token lifetime in milliseconds (default: 5 days)
    pub expiration_ms: i64,

    /// Issuer claim
    pub issuer: String,

    /// Audience claim
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_JWT_SECRET),
            expiration_ms: 432_000_000,
            issuer: String::from("Energosoft ITSS"),
            audience: String::from("User Management Portal"),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set token lifetime in days
    pub fn with_expiration_days(mut self, days: i64) -> Self {
        self.expiration_ms = days * 86_400_000;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_JWT_SECRET
    }
}

/// Failed login attempt cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginAttemptConfig {
    /// Failed attempts at which an account counts as locked
    pub max_attempts: u32,

    /// Lifetime of an attempt record in seconds, counted from its creation
    pub ttl_seconds: u64,

    /// Upper bound on tracked usernames
    pub max_entries: usize,
}

impl Default for LoginAttemptConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            ttl_seconds: 900,
            max_entries: 10_000,
        }
    }
}

/// Password hashing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PasswordConfig {
    /// bcrypt work factor
    pub bcrypt_cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self { bcrypt_cost: 12 }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Login attempt cache configuration
    #[serde(default)]
    pub login_attempts: LoginAttemptConfig,

    /// Password hashing configuration
    #[serde(default)]
    pub password: PasswordConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let jwt_defaults = JwtConfig::default();
        let attempt_defaults = LoginAttemptConfig::default();
        let password_defaults = PasswordConfig::default();

        Self {
            jwt: JwtConfig {
                secret: env::var("JWT_SECRET").unwrap_or(jwt_defaults.secret),
                expiration_ms: parse_env("JWT_EXPIRATION_MS", jwt_defaults.expiration_ms),
                issuer: jwt_defaults.issuer,
                audience: jwt_defaults.audience,
            },
            login_attempts: LoginAttemptConfig {
                max_attempts: parse_env("LOGIN_MAX_ATTEMPTS", attempt_defaults.max_attempts),
                ttl_seconds: parse_env("LOGIN_ATTEMPT_TTL_SECONDS", attempt_defaults.ttl_seconds),
                max_entries: parse_env("LOGIN_ATTEMPT_MAX_ENTRIES", attempt_defaults.max_entries),
            },
            password: PasswordConfig {
                bcrypt_cost: parse_env("BCRYPT_COST", password_defaults.bcrypt_cost),
            },
        }
    }
}

fn parse_env<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.expiration_ms, 432_000_000);
        assert_eq!(config.issuer, "Energosoft ITSS");
        assert!(config.is_using_default_secret());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("my-secret").with_expiration_days(1);
        assert_eq!(config.secret, "my-secret");
        assert_eq!(config.expiration_ms, 86_400_000);
        assert!(!config.is_using_default_secret());
    }

    #[test]
    fn test_login_attempt_defaults() {
        let config = LoginAttemptConfig::default();
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.ttl_seconds, 900);
        assert_eq!(config.max_entries, 10_000);
    }

    #[test]
    fn test_parse_env_falls_back_on_garbage() {
        std::env::set_var("UM_TEST_PARSE_ENV_GARBAGE", "not-a-number");
        assert_eq!(parse_env("UM_TEST_PARSE_ENV_GARBAGE", 7u32), 7);
        assert_eq!(parse_env("UM_TEST_PARSE_ENV_MISSING", 3u32), 3);
    }
}
