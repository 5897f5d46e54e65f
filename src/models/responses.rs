//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::{CacheStats, EvictionPolicy};

/// Response body for `PUT /v1/cache/{key}`
#[derive(Debug, Clone, Serialize)]
pub struct WriteResponse {
    /// "created" or "updated"
    pub status: &'static str,
}

impl WriteResponse {
    /// Creates a WriteResponse for a fresh insert or an update
    pub fn new(was_update: bool) -> Self {
        Self {
            status: if was_update { "updated" } else { "created" },
        }
    }
}

/// Response body for `DELETE /v1/cache/{key}`
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub status: &'static str,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn deleted() -> Self {
        Self { status: "deleted" }
    }
}

/// Response body for the metrics endpoint (`GET /metrics`)
#[derive(Debug, Clone, Serialize)]
pub struct MetricsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Current number of entries in cache
    pub items: usize,
    /// Number of entries removed after their TTL elapsed
    pub expired: u64,
    /// Number of capacity evictions
    pub evictions: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for MetricsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            items: stats.items,
            expired: stats.expired_removals,
            evictions: stats.evictions,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the health endpoint (`GET /health`)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Always "ok" while the server is answering
    pub status: &'static str,
    /// Current number of entries in cache
    pub items: usize,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn ok(items: usize) -> Self {
        Self {
            status: "ok",
            items,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Response body for `POST /v1/admin/config/eviction`
///
/// `active_policy` reports what the store actually does, which is always LRU.
#[derive(Debug, Clone, Serialize)]
pub struct EvictionConfigResponse {
    pub status: &'static str,
    /// Policy named in the request
    pub requested_policy: String,
    /// Policy the store is using
    pub active_policy: String,
}

impl EvictionConfigResponse {
    pub fn new(requested: EvictionPolicy, active: EvictionPolicy) -> Self {
        Self {
            status: "Eviction policy updated",
            requested_policy: requested.to_string(),
            active_policy: active.to_string(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
