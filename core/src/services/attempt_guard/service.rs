//! Concurrent attempt cache backed by a sharded map

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::{debug, info, warn};

use crate::services::clock::{Clock, SystemClock};

use super::LoginAttemptConfig;

/// Failed attempts recorded for one username
#[derive(Debug, Clone, Copy)]
struct AttemptRecord {
    count: u32,
    /// Epoch milliseconds; the TTL runs from here and is never refreshed
    created_at: i64,
}

impl AttemptRecord {
    fn first(now_ms: i64) -> Self {
        Self {
            count: 1,
            created_at: now_ms,
        }
    }

    fn is_expired(&self, now_ms: i64, ttl_ms: i64) -> bool {
        now_ms - self.created_at >= ttl_ms
    }
}

/// Tracks failed login attempts per username and decides lockout
///
/// Every operation on a single username goes through the owning shard's
/// lock, so concurrent increments for the same key are never lost.
pub struct LoginAttemptGuard {
    entries: DashMap<String, AttemptRecord>,
    config: LoginAttemptConfig,
    clock: Arc<dyn Clock>,
}

impl LoginAttemptGuard {
    /// Create a new guard driven by the wall clock
    pub fn new(config: LoginAttemptConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a new guard with default configuration
    pub fn with_defaults() -> Self {
        Self::new(LoginAttemptConfig::default())
    }

    /// Create a new guard with an explicit time source
    pub fn with_clock(config: LoginAttemptConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            config,
            clock,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.config.max_attempts
    }

    fn ttl_ms(&self) -> i64 {
        i64::try_from(self.config.ttl_seconds.saturating_mul(1000)).unwrap_or(i64::MAX)
    }

    /// Record one failed attempt for `username`
    ///
    /// Creates the record with a count of 1 when none is live, otherwise
    /// increments it in place.
    ///
    /// # Returns
    /// The attempt count after this failure
    pub fn record_failed_attempt(&self, username: &str) -> u32 {
        let now = self.clock.now_millis();
        let ttl_ms = self.ttl_ms();

        let (count, created) = match self.entries.entry(username.to_string()) {
            Entry::Occupied(mut occupied) => {
                let record = occupied.get_mut();
                if record.is_expired(now, ttl_ms) {
                    *record = AttemptRecord::first(now);
                } else {
                    record.count = record.count.saturating_add(1);
                }
                (record.count, false)
            }
            Entry::Vacant(vacant) => {
                vacant.insert(AttemptRecord::first(now));
                (1, true)
            }
        };

        if created && self.entries.len() > self.config.max_entries {
            self.evict_overflow(now, ttl_ms);
        }

        if count >= self.config.max_attempts {
            warn!(
                username = %username,
                attempts = count,
                max_attempts = self.config.max_attempts,
                "Failed login attempts reached lockout threshold"
            );
        } else {
            debug!(username = %username, attempts = count, "Failed login attempt recorded");
        }

        count
    }

    /// Whether the live record for `username` has reached the threshold
    pub fn has_exceeded_max_attempts(&self, username: &str) -> bool {
        self.failed_attempts(username) >= self.config.max_attempts
    }

    /// Live failed attempt count, 0 when there is no record or it expired
    pub fn failed_attempts(&self, username: &str) -> u32 {
        let now = self.clock.now_millis();
        let ttl_ms = self.ttl_ms();

        match self.entries.get(username) {
            None => return 0,
            Some(record) if !record.is_expired(now, ttl_ms) => return record.count,
            Some(_) => {}
        }

        // The shard guard is released before removing
        self.entries
            .remove_if(username, |_, record| record.is_expired(now, ttl_ms));
        debug!(username = %username, "Expired attempt record dropped");
        0
    }

    /// Remove the record for `username` unconditionally
    ///
    /// Called after a successful credential check and whenever an account
    /// goes back from locked to unlocked.
    pub fn evict_on_success(&self, username: &str) {
        if self.entries.remove(username).is_some() {
            info!(username = %username, "Failed attempt record cleared");
        }
    }

    /// Number of records currently held, expired ones included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Brings the map back under `max_entries`
    ///
    /// Expired records go first, then the oldest by creation time. A record
    /// re-created between the scan and the removal is left alone.
    fn evict_overflow(&self, now_ms: i64, ttl_ms: i64) {
        self.entries
            .retain(|_, record| !record.is_expired(now_ms, ttl_ms));

        let excess = self.entries.len().saturating_sub(self.config.max_entries);
        if excess == 0 {
            return;
        }

        let mut by_age: Vec<(String, i64)> = self
            .entries
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().created_at))
            .collect();
        by_age.sort_by_key(|(_, created_at)| *created_at);

        let mut evicted = 0usize;
        for (username, created_at) in by_age.into_iter().take(excess) {
            if self
                .entries
                .remove_if(&username, |_, record| record.created_at == created_at)
                .is_some()
            {
                evicted += 1;
            }
        }

        debug!(
            evicted,
            max_entries = self.config.max_entries,
            "Attempt cache over capacity, oldest records evicted"
        );
    }
}

impl std::fmt::Debug for LoginAttemptGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginAttemptGuard")
            .field("entries", &self.entries.len())
            .field("config", &self.config)
            .finish()
    }
}
