//! Session Cache Module
//!
//! The public handle tying the pieces together: the shared store, the TTL
//! policy and the background sweeper lifecycle.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::info;

use crate::config::CacheConfig;
use crate::error::Result;
use crate::store::{SessionStore, StoreStats};
use crate::sweeper::Sweeper;
use crate::ttl::TtlSetting;

// == Session Cache ==
/// Bounded, time-expiring session cache with a background expiration sweep.
///
/// Every operation takes the store lock, applies its effect immediately and
/// returns; awaiting a method only defers the notification of a result that
/// has already happened, never the mutation itself. The sweeper starts with
/// the cache and is stopped by [`shutdown`](SessionCache::shutdown) or on
/// drop, so no timer outlives the cache.
#[derive(Debug)]
pub struct SessionCache {
    /// Shared store, serialized behind a write lock
    store: Arc<RwLock<SessionStore>>,
    /// TTL policy applied on every set and touch
    ttl: TtlSetting,
    /// Background expiration sweep
    sweeper: Sweeper,
}

impl SessionCache {
    // == Constructor ==
    /// Builds the cache and starts its expiration sweeper. Must be called
    /// from within a tokio runtime, since the sweeper is a spawned task.
    ///
    /// Returns a configuration error if the config is malformed; nothing is
    /// constructed or spawned in that case.
    pub fn new(config: CacheConfig) -> Result<Self> {
        config.validate()?;

        let store = Arc::new(RwLock::new(SessionStore::new(config.max_entries)));
        let sweeper = Sweeper::spawn(store.clone(), config.check_period);
        info!(
            max_entries = ?config.max_entries,
            check_period_ms = config.check_period.as_millis() as u64,
            "session cache started"
        );

        Ok(Self {
            store,
            ttl: config.ttl,
            sweeper,
        })
    }

    // == Get ==
    /// Looks up a session record; absent for unknown, deleted or expired
    /// keys. Marks the entry most-recently-used.
    pub async fn get(&self, key: &str) -> Option<Value> {
        self.store.write().await.get(key)
    }

    // == Set ==
    /// Inserts or replaces a session record, with its lifetime resolved by
    /// the configured TTL policy.
    pub async fn set(&self, key: impl Into<String>, value: Value) {
        let key = key.into();
        let ttl = self.ttl.resolve(&key, &value);
        self.store.write().await.set(key, value, ttl);
    }

    // == Touch ==
    /// Restarts the lifetime of a live entry, resolving the TTL exactly as
    /// set does (from configuration, not from stored state). Returns false
    /// for unknown or expired keys.
    pub async fn touch(&self, key: &str, value: &Value) -> bool {
        let ttl = self.ttl.resolve(key, value);
        self.store.write().await.touch(key, ttl)
    }

    // == Delete ==
    /// Removes a session record; absent keys are a no-op.
    pub async fn delete(&self, key: &str) -> bool {
        self.store.write().await.delete(key)
    }

    // == Delete All ==
    /// Removes every key in the given sequence.
    pub async fn delete_all<I, S>(&self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.store.write().await.delete_all(keys)
    }

    // == Keys ==
    /// All non-expired keys at the time of the call.
    pub async fn keys(&self) -> Vec<String> {
        self.store.read().await.keys()
    }

    // == Entries ==
    /// All non-expired (key, value) pairs at the time of the call.
    pub async fn entries(&self) -> Vec<(String, Value)> {
        self.store.read().await.all_entries()
    }

    // == Clear ==
    /// Removes all session records unconditionally.
    pub async fn clear(&self) {
        self.store.write().await.clear()
    }

    // == Length ==
    /// Count of live (non-expired) entries.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    // == Is Empty ==
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    // == Stats ==
    /// Snapshot of the store's performance counters.
    pub async fn stats(&self) -> StoreStats {
        self.store.read().await.stats()
    }

    // == Shutdown ==
    /// Stops the expiration sweeper. Idempotent; stored entries remain
    /// readable, but expired ones are then only reclaimed lazily.
    pub fn shutdown(&mut self) {
        self.sweeper.stop();
    }

    // == Is Running ==
    /// Returns true while the background sweeper is scheduled.
    pub fn is_running(&self) -> bool {
        self.sweeper.is_running()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use serde_json::json;
    use tokio::time::advance;

    use crate::error::CacheError;

    fn test_config() -> CacheConfig {
        CacheConfig::default()
            .with_check_period(Duration::from_secs(60))
            .with_ttl(TtlSetting::Fixed(Duration::from_secs(300)))
    }

    #[tokio::test(start_paused = true)]
    async fn test_cache_set_get_roundtrip() {
        let cache = SessionCache::new(test_config()).unwrap();

        cache.set("sid1", json!({"user": "alice"})).await;

        assert_eq!(cache.get("sid1").await, Some(json!({"user": "alice"})));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cache_invalid_config_is_rejected() {
        let config = test_config().with_check_period(Duration::ZERO);

        assert!(matches!(
            SessionCache::new(config),
            Err(CacheError::Config(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cache_set_resolves_ttl_from_policy() {
        let config = test_config().with_ttl(TtlSetting::Fixed(Duration::from_millis(50)));
        let cache = SessionCache::new(config).unwrap();

        // Embedded max-age must lose against the fixed setting.
        cache
            .set("sid1", json!({"cookie": {"maxAge": 3_600_000}}))
            .await;
        advance(Duration::from_millis(60)).await;

        assert_eq!(cache.get("sid1").await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cache_touch_uses_configured_policy() {
        let config = test_config().with_ttl(TtlSetting::Fixed(Duration::from_millis(100)));
        let cache = SessionCache::new(config).unwrap();
        let record = json!({"user": "bob"});

        cache.set("sid1", record.clone()).await;
        advance(Duration::from_millis(80)).await;

        assert!(cache.touch("sid1", &record).await);
        advance(Duration::from_millis(80)).await;

        // Still alive thanks to the refreshed lifetime.
        assert_eq!(cache.get("sid1").await, Some(record));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cache_shutdown_is_idempotent() {
        let mut cache = SessionCache::new(test_config()).unwrap();

        assert!(cache.is_running());
        cache.shutdown();
        cache.shutdown();

        tokio::task::yield_now().await;
        assert!(!cache.is_running());

        // Operations keep working after shutdown.
        cache.set("sid1", json!(1)).await;
        assert_eq!(cache.len().await, 1);
    }
}
