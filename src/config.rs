//! Configuration Module
//!
//! Construction-time settings for the session cache, loadable from
//! environment variables with sensible defaults.

use std::env;
use std::time::Duration;

use crate::error::{CacheError, Result};
use crate::ttl::TtlSetting;

/// Default sweep period: one day.
pub const DEFAULT_CHECK_PERIOD: Duration = Duration::from_secs(24 * 60 * 60);

/// Session cache configuration.
///
/// Malformed values are configuration errors raised here, before any cache
/// exists; they are never deferred or silently replaced with a default.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries, None = unbounded
    pub max_entries: Option<usize>,
    /// Period between background expiration sweeps; must be positive
    pub check_period: Duration,
    /// TTL policy applied on every set and touch
    pub ttl: TtlSetting,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Entry cap (absent or empty: unbounded)
    /// - `CHECK_PERIOD_MS` - Sweep period in milliseconds (default: one day)
    /// - `SESSION_TTL_MS` - Fixed TTL in milliseconds (absent: per-record
    ///   max-age with a one-day fallback)
    ///
    /// A resolver-function TTL cannot be expressed in the environment; use
    /// [`with_ttl`](CacheConfig::with_ttl) for that.
    pub fn from_env() -> Result<Self> {
        let max_entries = match read_env("MAX_ENTRIES") {
            Some(raw) => Some(parse_env("MAX_ENTRIES", &raw)?),
            None => None,
        };

        let check_period = match read_env("CHECK_PERIOD_MS") {
            Some(raw) => Duration::from_millis(parse_env("CHECK_PERIOD_MS", &raw)?),
            None => DEFAULT_CHECK_PERIOD,
        };

        let ttl = match read_env("SESSION_TTL_MS") {
            Some(raw) => {
                TtlSetting::Fixed(Duration::from_millis(parse_env("SESSION_TTL_MS", &raw)?))
            }
            None => TtlSetting::Default,
        };

        let config = Self {
            max_entries,
            check_period,
            ttl,
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the entry cap; None means unbounded.
    pub fn with_max_entries(mut self, max_entries: Option<usize>) -> Self {
        self.max_entries = max_entries;
        self
    }

    /// Sets the background sweep period.
    pub fn with_check_period(mut self, check_period: Duration) -> Self {
        self.check_period = check_period;
        self
    }

    /// Sets the TTL policy.
    pub fn with_ttl(mut self, ttl: TtlSetting) -> Self {
        self.ttl = ttl;
        self
    }

    /// Checks the configuration for invalid shapes.
    ///
    /// Called by the cache constructor so builder-assembled configurations
    /// get the same scrutiny as environment-loaded ones.
    pub fn validate(&self) -> Result<()> {
        if self.check_period.is_zero() {
            return Err(CacheError::Config(
                "check period must be a positive duration".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: None,
            check_period: DEFAULT_CHECK_PERIOD,
            ttl: TtlSetting::Default,
        }
    }
}

// == Env Helpers ==
/// Reads a variable, treating absent and empty the same way.
fn read_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// Parses a numeric variable; a non-numeric shape is a configuration error,
/// not a silent default.
fn parse_env<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.parse().map_err(|_| {
        CacheError::Config(format!("{name} must be numeric, got {raw:?}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Env-var tests share process state; serialize them.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("MAX_ENTRIES");
        env::remove_var("CHECK_PERIOD_MS");
        env::remove_var("SESSION_TTL_MS");
    }

    #[test]
    fn test_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.max_entries, None);
        assert_eq!(config.check_period, DEFAULT_CHECK_PERIOD);
        assert!(matches!(&config.ttl, TtlSetting::Default));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_env_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let config = CacheConfig::from_env().unwrap();
        assert_eq!(config.max_entries, None);
        assert_eq!(config.check_period, DEFAULT_CHECK_PERIOD);
        assert!(matches!(&config.ttl, TtlSetting::Default));
    }

    #[test]
    fn test_config_from_env_values() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        env::set_var("MAX_ENTRIES", "500");
        env::set_var("CHECK_PERIOD_MS", "60000");
        env::set_var("SESSION_TTL_MS", "1800000");

        let config = CacheConfig::from_env().unwrap();
        assert_eq!(config.max_entries, Some(500));
        assert_eq!(config.check_period, Duration::from_secs(60));
        assert!(
            matches!(&config.ttl, TtlSetting::Fixed(ttl) if *ttl == Duration::from_secs(1800))
        );

        clear_env();
    }

    #[test]
    fn test_config_non_numeric_ttl_is_error() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        env::set_var("SESSION_TTL_MS", "tomorrow");

        let result = CacheConfig::from_env();
        assert!(matches!(result, Err(CacheError::Config(_))));

        clear_env();
    }

    #[test]
    fn test_config_zero_check_period_is_error() {
        let config = CacheConfig::default().with_check_period(Duration::ZERO);
        assert!(matches!(config.validate(), Err(CacheError::Config(_))));
    }

    #[test]
    fn test_config_builder_methods() {
        let config = CacheConfig::default()
            .with_max_entries(Some(10))
            .with_check_period(Duration::from_millis(250))
            .with_ttl(TtlSetting::Fixed(Duration::from_secs(5)));

        assert_eq!(config.max_entries, Some(10));
        assert_eq!(config.check_period, Duration::from_millis(250));
        assert!(matches!(&config.ttl, TtlSetting::Fixed(_)));
    }
}
