//! In-memory implementation of the AccountDirectory trait.
//!
//! Records live in a `HashMap` keyed by id behind a tokio `RwLock`. Uniqueness
//! of username and email is enforced on every save, so the directory invariant
//! holds even if two registrations race past the service-level check.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use um_core::domain::entities::user::User;
use um_core::errors::{AuthError, DomainError};
use um_core::repositories::AccountDirectory;

use crate::InfrastructureError;

/// In-memory AccountDirectory
pub struct InMemoryAccountDirectory {
    users: RwLock<HashMap<i64, User>>,
    next_id: AtomicI64,
}

impl InMemoryAccountDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

impl Default for InMemoryAccountDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountDirectory for InMemoryAccountDirectory {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().await;
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by_key(|u| u.id);
        Ok(all)
    }

    async fn save(&self, mut user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        for other in users.values().filter(|u| u.id != user.id) {
            if other.username == user.username {
                return Err(AuthError::UsernameExists.into());
            }
            if other.email == user.email {
                return Err(AuthError::EmailExists.into());
            }
        }

        if user.is_persisted() {
            if !users.contains_key(&user.id) {
                return Err(InfrastructureError::Directory(format!(
                    "No user with id {}",
                    user.id
                ))
                .into());
            }
        } else {
            user.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        }

        debug!(id = user.id, username = %user.username, "User saved");
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, DomainError> {
        Ok(self.users.write().await.remove(&id).is_some())
    }
}
