//! Authentication service module
//!
//! This module orchestrates account authentication:
//! - Credential checks with brute force lockout
//! - Token issuing on successful login
//! - Registration and updates with username/email uniqueness
//! - Password reset and administrative unlock

mod config;
mod service;
mod types;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use service::AuthService;
pub use types::{NewUser, UserUpdate};
