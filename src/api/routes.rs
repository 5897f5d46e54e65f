//! API Routes
//!
//! Configures the Axum router with all cache server endpoints.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    delete_handler, eviction_config_handler, get_handler, health_handler, metrics_handler,
    put_handler, AppState,
};
use crate::cache::DEFAULT_MAX_BODY_SIZE;

/// Creates the main router with the default body size limit.
pub fn create_router(state: AppState) -> Router {
    create_router_with_limit(state, DEFAULT_MAX_BODY_SIZE)
}

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /v1/cache/:key` - Store the request body, optional `?ttl=` seconds
/// - `GET /v1/cache/:key` - Retrieve the stored bytes
/// - `DELETE /v1/cache/:key` - Delete a key
/// - `GET /metrics` - Cache statistics
/// - `GET /health` - Health check with item count
/// - `POST /v1/admin/config/eviction` - Bearer-gated policy request (no effect)
///
/// # Middleware
/// - Body limit: request bodies above `max_body_size` bytes are rejected
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router_with_limit(state: AppState, max_body_size: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/v1/cache/:key",
            get(get_handler).put(put_handler).delete(delete_handler),
        )
        .route("/v1/admin/config/eviction", post(eviction_config_handler))
        .route("/metrics", get(metrics_handler))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(max_body_size))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStore;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let state = AppState::new(CacheStore::new(100).unwrap(), "dev-admin-token");
        create_router(state)
    }

    async fn send(app: Router, method: &str, uri: &str, body: Body) -> StatusCode {
        app.oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(body)
                .unwrap(),
        )
        .await
        .unwrap()
        .status()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let status = send(create_test_app(), "GET", "/health", Body::empty()).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let status = send(create_test_app(), "GET", "/metrics", Body::empty()).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_put_endpoint() {
        let app = create_test_app();

        let status = send(app.clone(), "PUT", "/v1/cache/test", Body::from("hello")).await;
        assert_eq!(status, StatusCode::CREATED);

        let status = send(app, "PUT", "/v1/cache/test?ttl=60", Body::from("again")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let status = send(create_test_app(), "GET", "/v1/cache/nonexistent", Body::empty()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_admin_without_token() {
        let status = send(
            create_test_app(),
            "POST",
            "/v1/admin/config/eviction",
            Body::from(r#"{"policy":"LRU"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_body_limit_enforced() {
        let state = AppState::new(CacheStore::new(10).unwrap(), "dev-admin-token");
        let app = create_router_with_limit(state, 8);

        let status = send(app, "PUT", "/v1/cache/big", Body::from(vec![0u8; 64])).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }
}
