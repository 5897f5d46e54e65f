//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use tokio::sync::RwLock;
use tracing::info;

use crate::api::auth::require_bearer;
use crate::cache::{CacheStore, SharedCache};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    DeleteResponse, EvictionConfigRequest, EvictionConfigResponse, HealthResponse,
    MetricsResponse, PutParams, WriteResponse,
};

/// Application state shared across all handlers.
///
/// Contains the cache store wrapped in Arc<RwLock<>> for thread-safe access.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache store
    pub cache: SharedCache,
    /// Bearer token required by admin endpoints
    pub admin_token: Arc<str>,
}

impl AppState {
    /// Creates a new AppState with the given cache store and admin token.
    pub fn new(cache: CacheStore, admin_token: impl Into<Arc<str>>) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            admin_token: admin_token.into(),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// # Errors
    /// Fails if the configured capacity is invalid.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = CacheStore::new(config.max_items)?;
        Ok(Self::new(cache, config.admin_token.as_str()))
    }
}

/// Handler for PUT /v1/cache/:key
///
/// Stores the raw request body under `key`, with an optional `ttl` query
/// parameter in seconds. Responds 201 for a new key, 200 for an update.
///
/// The query is taken as raw pairs so a repeated or malformed `ttl` never
/// rejects the write.
pub async fn put_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<Vec<(String, String)>>,
    body: Bytes,
) -> (StatusCode, Json<WriteResponse>) {
    let params = PutParams::from_pairs(query);

    let outcome = {
        let mut cache = state.cache.write().await;
        cache.put(key, body, params.ttl_seconds())
    };

    let status = if outcome.was_update {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    (status, Json(WriteResponse::new(outcome.was_update)))
}

/// Handler for GET /v1/cache/:key
///
/// Returns the stored bytes unchanged, or 404 if the key is absent or expired.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Bytes> {
    // Acquire write lock (needed for LRU touch and stats update)
    let mut cache = state.cache.write().await;
    cache.get(&key).ok_or(CacheError::NotFound(key))
}

/// Handler for DELETE /v1/cache/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let mut cache = state.cache.write().await;
    if cache.delete(&key) {
        Ok(Json(DeleteResponse::deleted()))
    } else {
        Err(CacheError::NotFound(key))
    }
}

/// Handler for GET /metrics
///
/// Returns current cache statistics.
pub async fn metrics_handler(State(state): State<AppState>) -> Json<MetricsResponse> {
    // Acquire read lock for stats
    let cache = state.cache.read().await;
    Json(MetricsResponse::from(cache.stats()))
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let items = state.cache.read().await.stats().items;
    Json(HealthResponse::ok(items))
}

/// Handler for POST /v1/admin/config/eviction
///
/// Validates a policy change request and acknowledges it. The store keeps
/// evicting least-recently-used entries whatever policy is named.
pub async fn eviction_config_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<EvictionConfigResponse>> {
    require_bearer(&headers, &state.admin_token)?;

    let requested = EvictionConfigRequest::from_body(&body)?.validate()?;
    let active = state.cache.read().await.policy();

    info!(
        requested = %requested,
        active = %active,
        "Eviction policy change requested; store remains LRU"
    );

    Ok(Json(EvictionConfigResponse::new(requested, active)))
}
