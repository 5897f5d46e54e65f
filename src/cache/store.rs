//! Cache Store Module
//!
//! Main cache engine combining recency-ordered storage with TTL expiration
//! and capacity-bound LRU eviction.

use bytes::Bytes;
use tracing::debug;

use crate::cache::entry::current_timestamp_ms;
use crate::cache::{CacheEntry, CacheStats, EvictionPolicy, LruMap};
use crate::error::{CacheError, Result};

// == Put Outcome ==
/// Result of a [`CacheStore::put`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PutOutcome {
    /// True if a live entry for the key was replaced
    pub was_update: bool,
}

// == Cache Store ==
/// Main cache storage with LRU eviction and TTL support.
///
/// Operations that depend on time come in two forms: the plain form reads the
/// wall clock, the `_at` form takes the current Unix time in milliseconds.
#[derive(Debug)]
pub struct CacheStore {
    /// Entries ordered from least to most recently used
    entries: LruMap<CacheEntry>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_items: usize,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore holding at most `max_items` entries.
    ///
    /// # Errors
    /// Returns `CacheError::InvalidCapacity` if `max_items` is zero.
    pub fn new(max_items: usize) -> Result<Self> {
        if max_items < 1 {
            return Err(CacheError::InvalidCapacity(max_items));
        }

        Ok(Self {
            entries: LruMap::with_capacity(max_items.min(4096)),
            stats: CacheStats::new(),
            max_items,
        })
    }

    // == Put ==
    /// Stores a value under `key` with optional TTL in seconds.
    ///
    /// See [`CacheStore::put_at`].
    pub fn put(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Bytes>,
        ttl_seconds: Option<u64>,
    ) -> PutOutcome {
        self.put_at(key, value, ttl_seconds, current_timestamp_ms())
    }

    /// Stores a value as of `now_ms`.
    ///
    /// A live entry for the key is replaced (value and expiry) and becomes the
    /// most recently used. An entry that had already expired is counted as an
    /// expired removal and the write is reported as a fresh insert. If the
    /// insert takes the store over capacity, the least recently used entry is
    /// evicted.
    pub fn put_at(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Bytes>,
        ttl_seconds: Option<u64>,
        now_ms: u64,
    ) -> PutOutcome {
        let key = key.into();

        let was_update = match self.entries.peek(&key).map(|e| e.is_expired_at(now_ms)) {
            Some(true) => {
                self.entries.remove(&key);
                self.stats.record_expired(1);
                false
            }
            Some(false) => true,
            None => false,
        };

        let entry = CacheEntry::new_at(value.into(), ttl_seconds, now_ms);
        self.entries.insert(key, entry);

        // Put adds at most one entry, so one eviction restores the bound
        if self.entries.len() > self.max_items {
            if let Some((evicted, _)) = self.entries.pop_lru() {
                self.stats.record_eviction();
                debug!(key = %evicted, "evicted least recently used entry");
            }
        }

        PutOutcome { was_update }
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// See [`CacheStore::get_at`].
    pub fn get(&mut self, key: &str) -> Option<Bytes> {
        self.get_at(key, current_timestamp_ms())
    }

    /// Retrieves a value as of `now_ms`.
    ///
    /// A live entry is counted as a hit and becomes the most recently used.
    /// An expired entry is removed and counted both as an expired removal and
    /// as a miss.
    pub fn get_at(&mut self, key: &str, now_ms: u64) -> Option<Bytes> {
        let expired = match self.entries.peek(key) {
            Some(entry) => entry.is_expired_at(now_ms),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.entries.remove(key);
            self.stats.record_expired(1);
            self.stats.record_miss();
            return None;
        }

        self.stats.record_hit();
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Delete ==
    /// Removes an entry by key, returning whether it was present.
    ///
    /// Counters are never touched.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Sweep Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// See [`CacheStore::sweep_expired_at`].
    pub fn sweep_expired(&mut self) -> usize {
        self.sweep_expired_at(current_timestamp_ms())
    }

    /// Removes every entry expired as of `now_ms`, preserving the recency
    /// order of the survivors.
    ///
    /// Returns the number of entries removed.
    pub fn sweep_expired_at(&mut self, now_ms: u64) -> usize {
        let removed = self.entries.retain(|_, entry| !entry.is_expired_at(now_ms));
        self.stats.record_expired(removed as u64);
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_items(self.entries.len());
        stats
    }

    // == Policy ==
    /// Returns the eviction policy in effect, which is always LRU.
    pub fn policy(&self) -> EvictionPolicy {
        EvictionPolicy::Lru
    }

    // == Contains ==
    /// Checks whether an entry is stored for `key`, expired or not.
    ///
    /// Does not affect recency or statistics.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains(key)
    }

    /// Returns the configured maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.max_items
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the stored keys from least to most recently used.
    pub fn keys_by_recency(&self) -> Vec<String> {
        self.entries.iter().map(|(key, _)| key.to_string()).collect()
    }
}
