//! Store Module
//!
//! The synchronous cache engine: bounded session storage with TTL expiration
//! and LRU eviction.

mod entry;
mod lru;
mod stats;
#[allow(clippy::module_inception)]
mod store;


// Re-export public types
pub use entry::SessionEntry;
pub use lru::RecencyList;
pub use stats::StoreStats;
pub use store::SessionStore;
