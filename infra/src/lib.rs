//! # Infrastructure Layer
//!
//! Concrete implementations of the collaborators the core consumes:
//! - **Directory**: an in-memory account directory enforcing unique
//!   usernames and emails
//! - **Email**: a dispatcher that logs deliveries instead of sending them

use um_core::errors::DomainError;

/// Directory module - account storage
pub mod directory;

/// Email module - password delivery
pub mod email;

pub use directory::InMemoryAccountDirectory;
pub use email::{LoggingEmailDispatcher, OutgoingEmail};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Directory storage error
    #[error("Directory error: {0}")]
    Directory(String),

    /// Email delivery error
    #[error("Email delivery error: {0}")]
    Email(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::Internal {
            message: err.to_string(),
        }
    }
}
