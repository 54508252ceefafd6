//! Error types for the session cache
//!
//! Provides unified error handling using thiserror.
//!
//! The error surface is deliberately narrow: looking up, deleting, or touching
//! an absent key is a normal empty result, never an error. The only failure
//! the cache can produce is a malformed configuration, raised synchronously
//! at configuration time.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the session cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// A configuration value had an invalid shape (e.g. a non-numeric TTL
    /// or a zero sweep period)
    #[error("Invalid configuration: {0}")]
    Config(String),
}

// == Result Type Alias ==
/// Convenience Result type for the session cache.
pub type Result<T> = std::result::Result<T, CacheError>;

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = CacheError::Config("ttl must be numeric".to_string());
        assert_eq!(err.to_string(), "Invalid configuration: ttl must be numeric");
    }
}
