//! Token entities for bearer authentication.

use serde::{Deserialize, Serialize};

/// Token lifetime: 5 days expressed in milliseconds
pub const EXPIRATION_TIME_MS: i64 = 432_000_000;

/// Prefix carried in front of the signed token on the wire
pub const TOKEN_PREFIX: &str = "Bearer ";

/// Response header carrying the issued token
pub const JWT_TOKEN_HEADER: &str = "Jwt-Token";

/// Issuer claim
pub const TOKEN_ISSUER: &str = "Energosoft ITSS";

/// Audience claim
pub const TOKEN_AUDIENCE: &str = "User Management Portal";

/// Claims structure for the signed token payload
///
/// Timestamps are epoch milliseconds; `expires_at - issued_at` is the
/// configured lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,

    /// Authorities granted by the subject's role
    pub authorities: Vec<String>,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// Issued at, epoch milliseconds
    #[serde(rename = "issuedAt")]
    pub issued_at: i64,

    /// Expires at, epoch milliseconds
    #[serde(rename = "expiresAt")]
    pub expires_at: i64,
}

impl Claims {
    /// Creates a claim set valid for `ttl_ms` from `issued_at`
    pub fn new(
        subject: impl Into<String>,
        authorities: Vec<String>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
        issued_at: i64,
        ttl_ms: i64,
    ) -> Self {
        Self {
            sub: subject.into(),
            authorities,
            iss: issuer.into(),
            aud: audience.into(),
            issued_at,
            expires_at: issued_at + ttl_ms,
        }
    }

    /// Expired strictly after `expires_at`
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        now_ms > self.expires_at
    }
}

/// Formats a signed token as the wire header value
pub fn bearer(token: &str) -> String {
    format!("{}{}", TOKEN_PREFIX, token)
}
