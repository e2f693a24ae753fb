//! Background Tasks Module
//!
//! Optional tasks that can run alongside a cache.
//!
//! # Tasks
//! - Expiry sweep: drops expired entries at a fixed interval

mod cleanup;

pub use cleanup::{spawn_cleanup_task, spawn_configured_cleanup};
