//! Tests for brute force lockout driven by the attempt guard

use chrono::Duration;

use crate::domain::entities::user::Role;
use crate::errors::{AuthError, DomainError};

use super::mocks::*;

fn is_auth_error(result: &Result<impl std::fmt::Debug, DomainError>, expected: AuthError) -> bool {
    matches!(result, Err(DomainError::Auth(e)) if *e == expected)
}

#[tokio::test]
async fn test_dave_is_locked_out_then_recovers_after_unlock() {
    let harness = Harness::new();
    harness.seed_user("dave", "dave-correct", Role::User);

    for _ in 0..5 {
        let result = harness.service.login("dave", "nope").await;
        assert!(is_auth_error(&result, AuthError::AuthenticationFailed));
    }

    // Correct password while locked is refused and does not reset the count
    let result = harness.service.login("dave", "dave-correct").await;
    assert!(is_auth_error(&result, AuthError::AccountLocked));
    assert!(harness.guard.has_exceeded_max_attempts("dave"));
    assert!(!harness.directory.get("dave").unwrap().is_not_locked);

    harness.guard.evict_on_success("dave");

    let outcome = harness.service.login("dave", "dave-correct").await.unwrap();
    assert!(outcome.user.is_not_locked);
    assert!(harness.directory.get("dave").unwrap().is_not_locked);
    assert_eq!(harness.codec.verify(&outcome.token).unwrap().sub, "dave");
}

#[tokio::test]
async fn test_lockout_ends_after_ttl() {
    let harness = Harness::new();
    harness.seed_user("dave", "dave-correct", Role::User);

    for _ in 0..5 {
        let _ = harness.service.login("dave", "nope").await;
    }
    let result = harness.service.login("dave", "dave-correct").await;
    assert!(is_auth_error(&result, AuthError::AccountLocked));

    harness.clock.advance(Duration::minutes(15));

    let outcome = harness.service.login("dave", "dave-correct").await.unwrap();
    assert!(outcome.user.is_not_locked);
}

#[tokio::test]
async fn test_fifth_failure_persists_locked_flag() {
    let harness = Harness::new();
    harness.seed_user("dave", "dave-correct", Role::User);

    for _ in 0..4 {
        let _ = harness.service.login("dave", "nope").await;
    }
    assert!(harness.directory.get("dave").unwrap().is_not_locked);

    let result = harness.service.login("dave", "nope").await;
    // The fifth failure still reads as bad credentials
    assert!(is_auth_error(&result, AuthError::AuthenticationFailed));
    assert!(!harness.directory.get("dave").unwrap().is_not_locked);
}

#[tokio::test]
async fn test_failures_while_locked_keep_counting() {
    let harness = Harness::new();
    harness.seed_user("dave", "dave-correct", Role::User);

    for _ in 0..7 {
        let _ = harness.service.login("dave", "nope").await;
    }
    let _ = harness.service.login("dave", "dave-correct").await;

    assert_eq!(harness.guard.failed_attempts("dave"), 7);
}

#[tokio::test]
async fn test_admin_unlock_account() {
    let harness = Harness::new();
    harness.seed_user("dave", "dave-correct", Role::User);

    for _ in 0..5 {
        let _ = harness.service.login("dave", "nope").await;
    }

    let user = harness.service.unlock_account("dave").await.unwrap();
    assert!(user.is_not_locked);
    assert!(!harness.guard.has_exceeded_max_attempts("dave"));

    harness.service.login("dave", "dave-correct").await.unwrap();
}

#[tokio::test]
async fn test_unlock_unknown_account() {
    let harness = Harness::new();
    let result = harness.service.unlock_account("ghost").await;
    assert!(is_auth_error(&result, AuthError::UserNotFound));
}

#[tokio::test]
async fn test_lockout_is_per_user() {
    let harness = Harness::new();
    harness.seed_user("dave", "dave-correct", Role::User);
    harness.seed_user("erin", "erin-correct", Role::User);

    for _ in 0..5 {
        let _ = harness.service.login("dave", "nope").await;
    }

    harness.service.login("erin", "erin-correct").await.unwrap();
}
