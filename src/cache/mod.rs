//! Cache Module
//!
//! Provides an in-memory key-value store with per-entry timeouts and an
//! injectable clock.

mod clock;
mod entry;
mod stats;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::Cache;
