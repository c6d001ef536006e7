//! API Handlers
//!
//! HTTP request handlers for each content cache endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::HeaderValue,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::info;

use crate::cache::{ResponseCache, MATCH_ALL};
use crate::config::Config;
use crate::content::{load_fallbacks, ContentLoader, Filters, HttpContentSource};
use crate::error::{CacheError, Result};
use crate::models::{
    DeleteResponse, GetResponse, HealthResponse, InvalidateRequest, InvalidateResponse,
    SetRequest, SetResponse, StatsResponse,
};

/// Header set on content responses served from demo fallback data.
pub const FALLBACK_HEADER: &str = "x-content-fallback";

/// Application state shared across all handlers.
///
/// The cache handle is cheap to clone; the loader holds a clone of the same
/// cache, so direct writes and content loads see each other.
#[derive(Clone)]
pub struct AppState {
    /// Shared response cache
    pub cache: ResponseCache<Value>,
    /// Read-through loader over the same cache
    pub loader: ContentLoader,
}

impl AppState {
    /// Creates a new AppState around a content loader.
    pub fn new(loader: ContentLoader) -> Self {
        Self {
            cache: loader.cache().clone(),
            loader,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the HTTP content source and loads demo content if configured.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let cache = ResponseCache::new(config.default_ttl());
        let source = HttpContentSource::new(&config.upstream_url, config.upstream_timeout())?;
        let mut loader = ContentLoader::new(cache, Arc::new(source));

        if let Some(path) = &config.fallback_content {
            let fallbacks = load_fallbacks(path)?;
            info!("Loaded fallback content for {} resources", fallbacks.len());
            loader = loader.with_fallbacks(fallbacks);
        }

        Ok(Self::new(loader))
    }
}

/// Handler for PUT /set
///
/// Stores a JSON value in the cache with optional TTL.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    match req.ttl_ms {
        Some(ttl_ms) => {
            state
                .cache
                .set_with_ttl(req.key.clone(), req.value, Duration::from_millis(ttl_ms))
                .await
        }
        None => state.cache.set(req.key.clone(), req.value).await,
    }

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /get/:key
///
/// Returns the value if present and fresh; expired entries are evicted.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    match state.cache.get(&key).await {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for DELETE /del/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    if state.cache.delete(&key).await {
        Ok(Json(DeleteResponse::new(key)))
    } else {
        Err(CacheError::NotFound(key))
    }
}

/// Handler for POST /invalidate
///
/// Removes every key matching the glob pattern.
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Json(req): Json<InvalidateRequest>,
) -> Json<InvalidateResponse> {
    let removed = state.cache.invalidate_by_pattern(&req.pattern).await;
    info!(pattern = %req.pattern, removed, "pattern invalidation");

    Json(InvalidateResponse::new(req.pattern, removed))
}

/// Handler for DELETE /clear
pub async fn clear_handler(State(state): State<AppState>) -> Json<InvalidateResponse> {
    let removed = state.cache.invalidate_by_pattern(MATCH_ALL).await;
    info!(removed, "cache cleared");

    Json(InvalidateResponse::new(MATCH_ALL, removed))
}

/// Handler for GET /content/*resource
///
/// Read-through load of a backend resource. Query parameters become filters
/// and are part of the cache key.
pub async fn content_handler(
    State(state): State<AppState>,
    Path(resource): Path<String>,
    Query(filters): Query<Filters>,
) -> Result<Response> {
    let resource = resource.trim_start_matches('/');
    let content = state.loader.load(resource, &filters, None).await?;

    let mut response = Json(content.data).into_response();
    if content.fallback {
        response
            .headers_mut()
            .insert(FALLBACK_HEADER, HeaderValue::from_static("true"));
    }
    Ok(response)
}

/// Handler for DELETE /content/*resource
///
/// Evicts the resource and all of its filtered variants, as done after a
/// successful write to the backend.
pub async fn content_invalidate_handler(
    State(state): State<AppState>,
    Path(resource): Path<String>,
) -> Result<Json<InvalidateResponse>> {
    let resource = resource.trim_start_matches('/');
    let removed = state.loader.invalidate_resource(resource).await?;

    Ok(Json(InvalidateResponse::new(resource, removed)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.cache.stats().await))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
