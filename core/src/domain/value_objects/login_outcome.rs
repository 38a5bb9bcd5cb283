//! Result of a successful login.

use crate::domain::entities::token::bearer;
use crate::domain::entities::user::User;

/// Snapshot of the authenticated user plus the freshly issued token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    /// User as persisted after login bookkeeping
    pub user: User,

    /// Signed token without the bearer prefix
    pub token: String,
}

impl LoginOutcome {
    pub fn new(user: User, token: String) -> Self {
        Self { user, token }
    }

    /// Value for the `Jwt-Token` response header
    pub fn bearer_header_value(&self) -> String {
        bearer(&self.token)
    }
}
