//! Shared setup for API integration tests

#![allow(dead_code)]

use std::sync::Arc;

use um_api::app::{build_services, DefaultServices};
use um_core::services::UserUpdate;
use um_infra::{InMemoryAccountDirectory, LoggingEmailDispatcher};
use um_shared::{AuthConfig, JwtConfig};

pub struct TestContext {
    pub services: DefaultServices,
    pub dispatcher: Arc<LoggingEmailDispatcher>,
}

pub fn test_context() -> TestContext {
    let mut auth = AuthConfig::default();
    auth.jwt = JwtConfig::new("api-integration-test-secret");
    auth.password.bcrypt_cost = 4;

    let dispatcher = Arc::new(LoggingEmailDispatcher::with_outbox());
    let services = build_services(
        &auth,
        Arc::new(InMemoryAccountDirectory::new()),
        dispatcher.clone(),
    )
    .unwrap();

    TestContext {
        services,
        dispatcher,
    }
}

impl TestContext {
    /// Register through the service and return the emailed password
    pub async fn register(&self, username: &str) -> String {
        let email = format!("{}@example.com", username);
        self.services
            .state
            .auth_service
            .register("Test", "User", username, &email)
            .await
            .unwrap();
        self.dispatcher.last_password_for(&email).await.unwrap()
    }

    /// Give an existing user a new role
    pub async fn promote(&self, username: &str, role: &str) {
        self.services
            .state
            .auth_service
            .update_user(
                username,
                UserUpdate {
                    first_name: "Test".to_string(),
                    last_name: "User".to_string(),
                    username: username.to_string(),
                    email: format!("{}@example.com", username),
                    role: role.to_string(),
                    is_active: true,
                    is_not_locked: true,
                },
            )
            .await
            .unwrap();
    }
}
