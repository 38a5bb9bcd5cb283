//! Account directory trait defining the interface for user persistence.
//!
//! The directory owns identity records. The core only reads through these
//! lookups and writes through `save`; failures are surfaced as
//! `DomainError::Internal` and never retried here.

use async_trait::async_trait;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User persistence operations
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use um_core::repositories::AccountDirectory;
/// use um_core::domain::entities::user::User;
/// use um_core::errors::DomainError;
///
/// struct PostgresAccountDirectory {
///     // connection pool
/// }
///
/// #[async_trait]
/// impl AccountDirectory for PostgresAccountDirectory {
///     async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
///         // Implementation here
///         Ok(None)
///     }
///
///     // ... other methods
/// #   async fn find_by_id(&self, _id: i64) -> Result<Option<User>, DomainError> { Ok(None) }
/// #   async fn find_by_email(&self, _email: &str) -> Result<Option<User>, DomainError> { Ok(None) }
/// #   async fn find_all(&self) -> Result<Vec<User>, DomainError> { Ok(vec![]) }
/// #   async fn save(&self, user: User) -> Result<User, DomainError> { Ok(user) }
/// #   async fn delete_by_id(&self, _id: i64) -> Result<bool, DomainError> { Ok(false) }
/// }
/// ```
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// Find a user by directory id
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError>;

    /// Find a user by exact username
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with that username
    /// * `Err(DomainError)` - Storage failure
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by exact email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// All users, ordered by id
    async fn find_all(&self) -> Result<Vec<User>, DomainError>;

    /// Insert or update a user
    ///
    /// A user with `id == 0` is inserted and receives a fresh id; any other
    /// id replaces the stored record.
    ///
    /// # Returns
    /// * `Ok(User)` - The stored user, with its assigned id
    /// * `Err(DomainError)` - Storage failure
    async fn save(&self, user: User) -> Result<User, DomainError>;

    /// Delete a user by id
    ///
    /// # Returns
    /// * `Ok(true)` - User was deleted
    /// * `Ok(false)` - No user with that id
    async fn delete_by_id(&self, id: i64) -> Result<bool, DomainError>;
}
