//! Configuration Module
//!
//! Handles loading cache configuration from environment variables.

use std::env;
use std::time::Duration as StdDuration;

use chrono::Duration;

use crate::error::{ConfigError, Result};

/// Environment variable holding the sweeper interval in milliseconds
pub const CLEANUP_INTERVAL_VAR: &str = "DUMMYCACHE_CLEANUP_INTERVAL_MS";

/// Environment variable holding the default timeout in seconds
pub const DEFAULT_TIMEOUT_VAR: &str = "DUMMYCACHE_DEFAULT_TIMEOUT";

const POSITIVE_SECONDS: &str = "positive whole seconds";

/// Cache configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CacheConfig {
    /// Background sweep interval, None = no sweeper
    pub cleanup_interval: Option<StdDuration>,
    /// Timeout applied when `set`/`add` are called without one, None = never expire
    pub default_timeout: Option<Duration>,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DUMMYCACHE_CLEANUP_INTERVAL_MS` - Sweep interval in milliseconds (default: unset, `0` also disables)
    /// - `DUMMYCACHE_DEFAULT_TIMEOUT` - Default timeout in seconds, must be positive (default: unset, entries never expire)
    pub fn from_env() -> Result<Self> {
        let cleanup_interval = match read_var::<u64>(CLEANUP_INTERVAL_VAR, "milliseconds")? {
            Some(0) | None => None,
            Some(ms) => Some(StdDuration::from_millis(ms)),
        };

        // Default timeout must be positive
        let default_timeout = read_var::<i64>(DEFAULT_TIMEOUT_VAR, POSITIVE_SECONDS)?
            .map(|secs| {
                Duration::try_seconds(secs)
                    .filter(|timeout| *timeout > Duration::zero())
                    .ok_or_else(|| ConfigError::InvalidValue {
                        var: DEFAULT_TIMEOUT_VAR,
                        value: secs.to_string(),
                        expected: POSITIVE_SECONDS,
                    })
            })
            .transpose()?;

        Ok(Self {
            cleanup_interval,
            default_timeout,
        })
    }
}

fn read_var<T: std::str::FromStr>(var: &'static str, expected: &'static str) -> Result<Option<T>> {
    match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                var,
                value: raw,
                expected,
            }),
        Err(_) => Ok(None),
    }
}
