//! Configuration for the token codec

use um_shared::config::JwtConfig;

use crate::domain::entities::token::{EXPIRATION_TIME_MS, TOKEN_AUDIENCE, TOKEN_ISSUER};

/// Configuration for the token codec
#[derive(Debug, Clone)]
pub struct TokenCodecConfig {
    /// Process-wide HMAC signing secret
    pub secret: String,
    /// Token lifetime in milliseconds
    pub expiration_ms: i64,
    /// Issuer claim written and required
    pub issuer: String,
    /// Audience claim written and required
    pub audience: String,
}

impl Default for TokenCodecConfig {
    fn default() -> Self {
        Self {
            secret: "development-secret-please-change-in-production".to_string(),
            expiration_ms: EXPIRATION_TIME_MS,
            issuer: TOKEN_ISSUER.to_string(),
            audience: TOKEN_AUDIENCE.to_string(),
        }
    }
}

impl TokenCodecConfig {
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }
}

impl From<&JwtConfig> for TokenCodecConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            secret: config.secret.clone(),
            expiration_ms: config.expiration_ms,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
        }
    }
}
