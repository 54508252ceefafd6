//! TTL Resolution Module
//!
//! Decides how long a session record lives before every insert or touch.
//!
//! Precedence, from strongest to weakest:
//! 1. A configured resolver function: its result is used exactly.
//! 2. A configured fixed duration: used even when the record embeds its own
//!    max-age.
//! 3. A numeric `cookie.maxAge` field (milliseconds) embedded in the record.
//! 4. [`DEFAULT_TTL`] of one day.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

// == Constants ==
/// Fallback lifetime for records that carry no usable max-age: one day.
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Resolver signature: `(key, value) -> ttl`.
pub type TtlResolver = Arc<dyn Fn(&str, &Value) -> Duration + Send + Sync>;

// == TTL Setting ==
/// The configured TTL policy, applied identically by set and touch.
#[derive(Clone, Default)]
pub enum TtlSetting {
    /// Always use this duration
    Fixed(Duration),
    /// Ask a caller-supplied function per call
    Resolver(TtlResolver),
    /// Use the record's embedded max-age, else [`DEFAULT_TTL`]
    #[default]
    Default,
}

impl TtlSetting {
    // == Resolve ==
    /// Resolves the lifetime for a record about to be stored or touched.
    pub fn resolve(&self, key: &str, value: &Value) -> Duration {
        match self {
            TtlSetting::Fixed(ttl) => *ttl,
            TtlSetting::Resolver(f) => f(key, value),
            TtlSetting::Default => embedded_max_age(value).unwrap_or(DEFAULT_TTL),
        }
    }
}

impl fmt::Debug for TtlSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TtlSetting::Fixed(ttl) => f.debug_tuple("Fixed").field(ttl).finish(),
            TtlSetting::Resolver(_) => f.write_str("Resolver(..)"),
            TtlSetting::Default => f.write_str("Default"),
        }
    }
}

// == Embedded Max-Age ==
/// Reads a non-negative numeric `cookie.maxAge` (milliseconds) out of a
/// session record. A missing or non-numeric field yields None; it is not an
/// error, the caller falls through to the default.
fn embedded_max_age(value: &Value) -> Option<Duration> {
    value
        .pointer("/cookie/maxAge")
        .and_then(Value::as_f64)
        .filter(|ms| *ms >= 0.0)
        .map(|ms| Duration::from_millis(ms as u64))
}
