//! One-way password hashing

use tracing::warn;

use crate::errors::{DomainError, DomainResult};

/// One-way password hash and verification
pub trait PasswordEncoder: Send + Sync {
    /// Hash a plaintext password for storage
    fn hash(&self, raw_password: &str) -> DomainResult<String>;

    /// Check a plaintext password against a stored hash
    ///
    /// A hash that cannot be parsed never matches.
    fn verify(&self, raw_password: &str, password_hash: &str) -> bool;

    /// Spend the same work as `verify` without a real account
    ///
    /// Used when the username does not exist so that response time does not
    /// reveal it.
    fn verify_dummy(&self, raw_password: &str);
}

/// bcrypt-backed encoder
#[derive(Debug, Clone)]
pub struct BcryptPasswordEncoder {
    cost: u32,
    dummy_hash: String,
}

impl BcryptPasswordEncoder {
    /// Create an encoder with the given work factor
    ///
    /// # Errors
    /// `DomainError::Internal` when bcrypt rejects the cost
    pub fn new(cost: u32) -> DomainResult<Self> {
        let dummy_hash = bcrypt::hash(super::generate_password(), cost).map_err(|e| {
            DomainError::internal(format!("Invalid bcrypt cost {}: {}", cost, e))
        })?;
        Ok(Self { cost, dummy_hash })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl PasswordEncoder for BcryptPasswordEncoder {
    fn hash(&self, raw_password: &str) -> DomainResult<String> {
        bcrypt::hash(raw_password, self.cost)
            .map_err(|e| DomainError::internal(format!("Password hashing failed: {}", e)))
    }

    fn verify(&self, raw_password: &str, password_hash: &str) -> bool {
        match bcrypt::verify(raw_password, password_hash) {
            Ok(matches) => matches,
            Err(e) => {
                warn!(error = %e, "Stored password hash could not be parsed");
                false
            }
        }
    }

    fn verify_dummy(&self, raw_password: &str) {
        let _ = bcrypt::verify(raw_password, &self.dummy_hash);
    }
}
