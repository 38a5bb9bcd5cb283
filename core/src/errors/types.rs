//! Domain-specific error types for authentication and related operations
//!
//! This module provides error type definitions for authentication, token
//! verification, and input validation. The HTTP status and the wording shown
//! to clients are decided in the presentation layer.

use thiserror::Error;

/// Authentication-related errors
///
/// `AuthenticationFailed` and `UserNotFound` raised by login must be rendered
/// identically to clients; the distinction exists for logging only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("User not found")]
    UserNotFound,

    #[error("No user found for email")]
    EmailNotFound,

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Account locked")]
    AccountLocked,

    #[error("Account disabled")]
    AccountDisabled,

    #[error("Username already exists")]
    UsernameExists,

    #[error("Email already exists")]
    EmailExists,

    #[error("Insufficient permissions")]
    InsufficientPermissions,
}

/// Why a presented token was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidTokenReason {
    /// Signature does not match the claim bytes
    BadSignature,
    /// Not a well-formed signed token, or claims that cannot be parsed
    Malformed,
    /// A required claim is absent
    MissingClaim(&'static str),
    /// Current time is past the expiry claim
    Expired,
    /// Header value did not start with the bearer prefix
    MissingBearerPrefix,
    /// Issuer claim differs from the configured issuer
    WrongIssuer,
    /// Audience claim differs from the configured audience
    WrongAudience,
}

impl std::fmt::Display for InvalidTokenReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidTokenReason::BadSignature => write!(f, "signature mismatch"),
            InvalidTokenReason::Malformed => write!(f, "malformed token"),
            InvalidTokenReason::MissingClaim(claim) => write!(f, "missing claim: {}", claim),
            InvalidTokenReason::Expired => write!(f, "token expired"),
            InvalidTokenReason::MissingBearerPrefix => write!(f, "missing bearer prefix"),
            InvalidTokenReason::WrongIssuer => write!(f, "unexpected issuer"),
            InvalidTokenReason::WrongAudience => write!(f, "unexpected audience"),
        }
    }
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid token: {0}")]
    InvalidToken(InvalidTokenReason),

    #[error("Token generation failed")]
    GenerationFailed,
}

/// Validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Unknown role: {role}")]
    UnknownRole { role: String },
}
