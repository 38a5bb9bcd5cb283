//! Unit tests for the in-memory directory

use chrono::Utc;

use um_core::domain::entities::user::{Role, User};
use um_core::errors::{AuthError, DomainError};
use um_core::repositories::AccountDirectory;

use crate::directory::InMemoryAccountDirectory;

fn user(username: &str, email: &str) -> User {
    User::new(
        "0123456789".to_string(),
        "Test".to_string(),
        "User".to_string(),
        username.to_string(),
        email.to_string(),
        "$2b$04$hash".to_string(),
        Role::User,
        Utc::now(),
    )
}

#[tokio::test]
async fn test_save_assigns_ids() {
    let directory = InMemoryAccountDirectory::new();

    let first = directory.save(user("ann", "ann@example.com")).await.unwrap();
    let second = directory.save(user("bob", "bob@example.com")).await.unwrap();

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
    assert_eq!(directory.len().await, 2);
}

#[tokio::test]
async fn test_lookups() {
    let directory = InMemoryAccountDirectory::new();
    let saved = directory.save(user("ann", "ann@example.com")).await.unwrap();

    assert_eq!(directory.find_by_id(saved.id).await.unwrap(), Some(saved.clone()));
    assert_eq!(directory.find_by_username("ann").await.unwrap(), Some(saved.clone()));
    assert_eq!(directory.find_by_email("ann@example.com").await.unwrap(), Some(saved));
    assert!(directory.find_by_username("ANN").await.unwrap().is_none());
}

#[tokio::test]
async fn test_save_updates_existing() {
    let directory = InMemoryAccountDirectory::new();
    let mut saved = directory.save(user("ann", "ann@example.com")).await.unwrap();

    saved.first_name = "Annie".to_string();
    saved.set_role(Role::Admin);
    directory.save(saved.clone()).await.unwrap();

    let stored = directory.find_by_username("ann").await.unwrap().unwrap();
    assert_eq!(stored.first_name, "Annie");
    assert_eq!(stored.role(), Role::Admin);
    assert_eq!(directory.len().await, 1);
}

#[tokio::test]
async fn test_save_enforces_unique_username_and_email() {
    let directory = InMemoryAccountDirectory::new();
    directory.save(user("ann", "ann@example.com")).await.unwrap();

    let result = directory.save(user("ann", "other@example.com")).await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::UsernameExists))));

    let result = directory.save(user("bob", "ann@example.com")).await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::EmailExists))));

    assert_eq!(directory.len().await, 1);
}

#[tokio::test]
async fn test_save_unknown_id_fails() {
    let directory = InMemoryAccountDirectory::new();
    let mut ghost = user("ghost", "ghost@example.com");
    ghost.id = 42;

    let result = directory.save(ghost).await;
    assert!(matches!(result, Err(DomainError::Internal { .. })));
}

#[tokio::test]
async fn test_find_all_is_ordered_and_delete() {
    let directory = InMemoryAccountDirectory::new();
    for name in ["c", "a", "b"] {
        directory
            .save(user(name, &format!("{}@example.com", name)))
            .await
            .unwrap();
    }

    let ids: Vec<i64> = directory.find_all().await.unwrap().iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);

    assert!(directory.delete_by_id(2).await.unwrap());
    assert!(!directory.delete_by_id(2).await.unwrap());
    assert_eq!(directory.len().await, 2);
}
