//! Configuration for the authentication service

use crate::domain::entities::user::Role;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Role given to self-registered users
    pub default_role: Role,
    /// Whether new and reset passwords are sent through the email dispatcher
    pub dispatch_passwords: bool,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            default_role: Role::User,
            dispatch_passwords: true,
        }
    }
}
