//! Email dispatcher that logs instead of sending

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::info;

use um_core::errors::DomainError;
use um_core::services::notification::EmailDispatcher;

use crate::InfrastructureError;

/// A password email that would have been sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub first_name: String,
    pub password: String,
    pub queued_at: DateTime<Utc>,
}

/// Dispatcher for development and tests
///
/// Every delivery is counted and logged with a masked address. The plaintext
/// password never reaches the log; when the outbox is enabled it is kept in
/// memory so it can be read back.
#[derive(Debug, Default)]
pub struct LoggingEmailDispatcher {
    counter: AtomicU64,
    simulate_failure: AtomicBool,
    keep_outbox: bool,
    outbox: Mutex<Vec<OutgoingEmail>>,
}

impl LoggingEmailDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatcher that also retains every message
    pub fn with_outbox() -> Self {
        Self {
            keep_outbox: true,
            ..Self::default()
        }
    }

    /// Make subsequent deliveries fail
    pub fn set_simulate_failure(&self, fail: bool) {
        self.simulate_failure.store(fail, Ordering::SeqCst);
    }

    /// Number of successful deliveries
    pub fn sent_count(&self) -> u64 {
        self.counter.load(Ordering::SeqCst)
    }

    /// Drain retained messages
    pub async fn take_outbox(&self) -> Vec<OutgoingEmail> {
        std::mem::take(&mut *self.outbox.lock().await)
    }

    /// Most recent retained password sent to `email`
    pub async fn last_password_for(&self, email: &str) -> Option<String> {
        let outbox = self.outbox.lock().await;
        outbox
            .iter()
            .rev()
            .find(|m| m.to == email)
            .map(|m| m.password.clone())
    }
}

#[async_trait]
impl EmailDispatcher for LoggingEmailDispatcher {
    async fn send_new_password_email(
        &self,
        first_name: &str,
        password: &str,
        email: &str,
    ) -> Result<(), DomainError> {
        if self.simulate_failure.load(Ordering::SeqCst) {
            return Err(InfrastructureError::Email(format!(
                "Simulated delivery failure to {}",
                mask_email(email)
            ))
            .into());
        }

        let count = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        if self.keep_outbox {
            self.outbox.lock().await.push(OutgoingEmail {
                to: email.to_string(),
                first_name: first_name.to_string(),
                password: password.to_string(),
                queued_at: Utc::now(),
            });
        }

        info!(
            to = %mask_email(email),
            count,
            "[LOGGING EMAIL] New password email for {}",
            first_name
        );
        Ok(())
    }
}

/// Mask the local part of an email address for logs
///
/// Keeps the first character of the local part and the whole domain.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first: String = local.chars().take(1).collect();
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}
