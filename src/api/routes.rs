//! API Routes
//!
//! Configures the Axum router with all content cache endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_handler, content_handler, content_invalidate_handler, delete_handler, get_handler,
    health_handler, invalidate_handler, set_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /set` - Store a JSON value
/// - `GET /get/:key` - Retrieve a fresh value by key
/// - `DELETE /del/:key` - Delete a key
/// - `POST /invalidate` - Delete all keys matching a glob pattern
/// - `DELETE /clear` - Delete everything
/// - `GET /content/*resource` - Read-through load from the content backend
/// - `DELETE /content/*resource` - Evict a resource and its filtered variants
/// - `GET /stats` - Get cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (the storefront is served from another host)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/set", put(set_handler))
        .route("/get/:key", get(get_handler))
        .route("/del/:key", delete(delete_handler))
        .route("/invalidate", post(invalidate_handler))
        .route("/clear", delete(clear_handler))
        .route(
            "/content/*resource",
            get(content_handler).delete(content_invalidate_handler),
        )
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
