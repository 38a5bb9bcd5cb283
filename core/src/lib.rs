//! # User Management Core
//!
//! Core business logic and domain layer for the user management backend.
//! This crate contains the identity record, the bearer token codec, the
//! failed-login attempt guard, the authentication service, repository and
//! collaborator interfaces, and the error types they share.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
