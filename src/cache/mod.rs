//! Cache Module
//!
//! Provides in-memory caching with TTL expiration and LRU eviction.

mod entry;
mod lru;
mod policy;
mod stats;
mod store;


use std::sync::Arc;

use tokio::sync::RwLock;

// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use lru::LruMap;
pub use policy::{EvictionPolicy, UnknownPolicy};
pub use stats::CacheStats;
pub use store::{CacheStore, PutOutcome};

/// A cache store shared between request handlers and background tasks.
///
/// Reads take the write lock too, since a hit reorders recency.
pub type SharedCache = Arc<RwLock<CacheStore>>;

// == Public Constants ==
/// Default maximum number of entries
pub const DEFAULT_MAX_ITEMS: usize = 1000;

/// Default maximum request body size in bytes
pub const DEFAULT_MAX_BODY_SIZE: usize = 20 * 1024 * 1024; // 20 MB
