//! Out-of-band delivery of generated credentials

use async_trait::async_trait;

use crate::errors::DomainError;

/// Sends generated passwords to users
///
/// Delivery is fire-and-forget for callers: a failure is reported but never
/// undoes the password change that was already persisted.
#[async_trait]
pub trait EmailDispatcher: Send + Sync {
    /// Send a newly generated plaintext password to `email`
    async fn send_new_password_email(
        &self,
        first_name: &str,
        password: &str,
        email: &str,
    ) -> Result<(), DomainError>;
}
