//! Session Entry Module
//!
//! Defines the structure for individual session entries with TTL support.

use std::time::Duration;

use serde_json::Value;
use tokio::time::Instant;

// == Session Entry ==
/// Represents a single stored session record with expiry metadata.
///
/// The value is an opaque JSON record; the store never inspects its contents
/// beyond passing it through to callers.
#[derive(Debug, Clone)]
pub struct SessionEntry {
    /// The stored session record
    pub value: Value,
    /// Instant the entry was inserted or last replaced
    pub inserted_at: Instant,
    /// Instant at which the entry expires
    pub expires_at: Instant,
}

impl SessionEntry {
    // == Constructor ==
    /// Creates a new entry expiring `ttl` after now.
    ///
    /// # Arguments
    /// * `value` - The session record to store
    /// * `ttl` - Remaining lifetime from now; zero means already expired
    pub fn new(value: Value, ttl: Duration) -> Self {
        let now = Instant::now();
        Self {
            value,
            inserted_at: now,
            expires_at: now + ttl,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired once the current instant is at
    /// or past `expires_at`. A zero TTL therefore expires immediately and is
    /// never visible to a subsequent read.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    // == Refresh ==
    /// Resets the entry's lifetime to `ttl` counted from now.
    ///
    /// Used by touch and by replacement: the effective expiry becomes
    /// relative to this call, not to the original insertion.
    pub fn refresh(&mut self, ttl: Duration) {
        let now = Instant::now();
        self.inserted_at = now;
        self.expires_at = now + ttl;
    }

    // == Time To Live ==
    /// Returns the remaining lifetime, zero if already expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}
