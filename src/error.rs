//! Error types for the cache
//!
//! Cache operations never fail; absence is reported through return values.
//! The only fallible surface is loading configuration.

use thiserror::Error;

// == Config Error Enum ==
/// Errors raised while loading [`CacheConfig`](crate::CacheConfig).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable holds a value that cannot be parsed
    #[error("Invalid value {value:?} for {var}: expected {expected}")]
    InvalidValue {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

// == Result Type Alias ==
/// Convenience Result type for configuration loading.
pub type Result<T> = std::result::Result<T, ConfigError>;
