//! Session Cache - a bounded, time-expiring in-memory store
//!
//! Holds short-lived session records with LRU eviction at a configurable
//! entry cap, per-entry TTL with lazy expiration on read, and a background
//! sweep that reclaims expired entries independent of access patterns.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use serde_json::json;
//! use session_cache::{CacheConfig, SessionCache, TtlSetting};
//!
//! # async fn demo() -> session_cache::Result<()> {
//! let config = CacheConfig::default()
//!     .with_max_entries(Some(10_000))
//!     .with_check_period(Duration::from_secs(60))
//!     .with_ttl(TtlSetting::Fixed(Duration::from_secs(1800)));
//!
//! let mut cache = SessionCache::new(config)?;
//! cache.set("sid-1", json!({"user": "alice"})).await;
//! let record = cache.get("sid-1").await;
//! cache.shutdown();
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod store;
pub mod sweeper;
pub mod ttl;

pub use cache::SessionCache;
pub use config::{CacheConfig, DEFAULT_CHECK_PERIOD};
pub use error::{CacheError, Result};
pub use store::{SessionStore, StoreStats};
pub use sweeper::Sweeper;
pub use ttl::{TtlResolver, TtlSetting, DEFAULT_TTL};
