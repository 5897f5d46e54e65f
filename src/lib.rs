//! Simple Cache - An in-memory HTTP key/value cache
//!
//! Stores opaque byte values with optional per-entry TTL, evicts the least
//! recently used entry when full, and reports hit/miss/expiry statistics.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::{create_router, AppState};
pub use config::Config;
pub use tasks::spawn_cleanup_task;
