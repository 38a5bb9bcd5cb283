//! Domain-specific error types and error handling.

mod types;


pub use types::{AuthError, InvalidTokenReason, TokenError, ValidationError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl DomainError {
    /// Shorthand for a directory or collaborator failure
    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }

    /// Whether this error is a rejected bearer token
    pub fn is_invalid_token(&self) -> bool {
        matches!(self, DomainError::Token(TokenError::InvalidToken(_)))
    }
}

impl From<InvalidTokenReason> for DomainError {
    fn from(reason: InvalidTokenReason) -> Self {
        DomainError::Token(TokenError::InvalidToken(reason))
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
