//! Failed login attempt tracking for brute force protection
//!
//! The guard keeps a bounded in-memory count of recent failed logins per
//! username. Records expire a fixed time after their creation and are
//! checked lazily on access; there is no background sweeper.

mod service;

#[cfg(test)]
mod tests;

pub use service::LoginAttemptGuard;
pub use um_shared::config::LoginAttemptConfig;
