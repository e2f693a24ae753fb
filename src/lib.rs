//! Dummy Cache - An in-memory cache for development and testing
//!
//! Stands in for a production cache: `set`, `get`, `add`, `delete` and
//! `clear` over a map held in memory, with optional per-entry timeouts
//! evaluated against an injectable clock.

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{Cache, CacheStats, Clock, ManualClock, SystemClock};
pub use config::CacheConfig;
pub use error::ConfigError;
pub use tasks::{spawn_cleanup_task, spawn_configured_cleanup};
