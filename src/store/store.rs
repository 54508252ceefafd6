//! Session Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking and TTL
//! expiration. All operations are synchronous; the async surface in
//! [`crate::cache`] serializes access to this type behind a lock.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::store::{RecencyList, SessionEntry, StoreStats};

// == Session Store ==
/// Bounded session storage with LRU eviction and TTL support.
///
/// Expired entries are treated as absent by every read even while physically
/// present; they are reclaimed lazily on access or in bulk by
/// [`sweep_expired`](SessionStore::sweep_expired).
#[derive(Debug)]
pub struct SessionStore {
    /// Key-value storage
    entries: HashMap<String, SessionEntry>,
    /// Access-order tracking for eviction
    recency: RecencyList,
    /// Performance counters
    stats: StoreStats,
    /// Maximum number of entries, None = unbounded
    max_entries: Option<usize>,
}

impl SessionStore {
    // == Constructor ==
    /// Creates a new store holding at most `max_entries` records.
    ///
    /// # Arguments
    /// * `max_entries` - Entry cap, or None for an unbounded store
    pub fn new(max_entries: Option<usize>) -> Self {
        Self {
            entries: HashMap::new(),
            recency: RecencyList::new(),
            stats: StoreStats::new(),
            max_entries,
        }
    }

    // == Get ==
    /// Looks up a session record by key.
    ///
    /// Returns None for keys that were never set, were deleted, or whose TTL
    /// has elapsed as of now. An expired entry found here is removed on the
    /// spot. A successful lookup marks the entry most-recently-used.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired() => {
                self.remove_expired(key);
                self.stats.record_miss();
                None
            }
            Some(entry) => {
                let value = entry.value.clone();
                self.recency.promote(key);
                self.stats.record_hit();
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Set ==
    /// Inserts or replaces a session record with the given remaining lifetime.
    ///
    /// Replacing an existing key overwrites its value, restarts its TTL from
    /// now and marks it most-recently-used. After the insert, least recently
    /// used entries are evicted until the live count is at or below the cap.
    pub fn set(&mut self, key: String, value: Value, ttl: Duration) {
        self.entries.insert(key.clone(), SessionEntry::new(value, ttl));
        self.recency.promote(&key);
        self.evict_over_capacity();
        self.stats.set_live_entries(self.entries.len());
    }

    // == Touch ==
    /// Restarts the TTL of a live entry and marks it most-recently-used.
    ///
    /// Returns false without side effects for unknown or expired keys. The
    /// duration must come from the same TTL policy that governs set.
    pub fn touch(&mut self, key: &str, ttl: Duration) -> bool {
        match self.entries.get_mut(key) {
            Some(entry) if entry.is_expired() => {
                self.remove_expired(key);
                false
            }
            Some(entry) => {
                entry.refresh(ttl);
                self.recency.promote(key);
                true
            }
            None => false,
        }
    }

    // == Delete ==
    /// Removes an entry unconditionally.
    ///
    /// Returns whether an entry was present; deleting an absent key is a
    /// no-op, never an error.
    pub fn delete(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.recency.remove(key);
            self.stats.set_live_entries(self.entries.len());
        }
        removed
    }

    // == Delete All ==
    /// Batch form of delete over a sequence of keys.
    pub fn delete_all<I, S>(&mut self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for key in keys {
            self.delete(key.as_ref());
        }
    }

    // == Keys ==
    /// Returns all non-expired keys at the time of the call.
    pub fn keys(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, entry)| !entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect()
    }

    // == Entries ==
    /// Returns (key, value) for all non-expired entries.
    ///
    /// Values are returned as stored; callers needing the key embedded in the
    /// record must add it themselves.
    pub fn all_entries(&self) -> Vec<(String, Value)> {
        self.entries
            .iter()
            .filter(|(_, entry)| !entry.is_expired())
            .map(|(key, entry)| (key.clone(), entry.value.clone()))
            .collect()
    }

    // == Clear ==
    /// Removes all entries unconditionally, resetting the store to empty.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.recency.clear();
        self.stats.set_live_entries(0);
    }

    // == Sweep Expired ==
    /// Removes every entry whose TTL has elapsed, returning the count removed.
    ///
    /// This is the only mechanism that reclaims entries which are set and
    /// never read again. O(stored entries); a no-op on an empty store.
    pub fn sweep_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.entries.remove(key);
            self.recency.remove(key);
        }

        let count = expired_keys.len();
        self.stats.record_expirations(count as u64);
        self.stats.set_live_entries(self.entries.len());
        count
    }

    // == Length ==
    /// Returns the count of live (non-expired) entries.
    pub fn len(&self) -> usize {
        self.entries
            .values()
            .filter(|entry| !entry.is_expired())
            .count()
    }

    // == Is Empty ==
    /// Returns true if the store holds no live entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // == Stats ==
    /// Returns a snapshot of the store's performance counters.
    pub fn stats(&self) -> StoreStats {
        let mut stats = self.stats.clone();
        stats.set_live_entries(self.entries.len());
        stats
    }

    // == Internal: Capacity Eviction ==
    /// Evicts least recently used entries until the count is at or below the
    /// cap. Independent of TTL: a victim may be evicted well before its TTL
    /// elapses.
    fn evict_over_capacity(&mut self) {
        let Some(max) = self.max_entries else {
            return;
        };
        while self.entries.len() > max {
            let Some(victim) = self.recency.pop_lru() else {
                break;
            };
            self.entries.remove(&victim);
            self.stats.record_eviction();
            debug!(key = %victim, "evicted least recently used entry");
        }
    }

    // == Internal: Lazy Expiration ==
    /// Drops an entry found expired during a read path.
    fn remove_expired(&mut self, key: &str) {
        self.entries.remove(key);
        self.recency.remove(key);
        self.stats.record_expirations(1);
        self.stats.set_live_entries(self.entries.len());
    }
}
