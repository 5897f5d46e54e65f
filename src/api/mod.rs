//! API Module
//!
//! HTTP handlers and routing for the cache server REST API.
//!
//! # Endpoints
//! - `PUT /v1/cache/:key` - Store raw bytes under a key
//! - `GET /v1/cache/:key` - Retrieve a value by key
//! - `DELETE /v1/cache/:key` - Delete a key
//! - `GET /metrics` - Cache statistics
//! - `GET /health` - Health check endpoint
//! - `POST /v1/admin/config/eviction` - Admin policy request (validated, no effect)

pub mod auth;
pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::{create_router, create_router_with_limit};
