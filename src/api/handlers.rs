//! API Handlers
//!
//! HTTP request handlers for each demo server endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::LruCache;
use crate::config::ServerConfig;
use crate::error::{CacheError, Result};
use crate::models::{
    GetResponse, HasResponse, HealthResponse, SetRequest, SetResponse, StatsResponse,
};

/// Application state shared across all handlers.
///
/// The cache serializes access internally, so handlers share it through a
/// plain `Arc`. The sweeper stops when the last clone of the state is dropped.
#[derive(Clone)]
pub struct AppState {
    /// Shared string cache
    pub cache: Arc<LruCache<String>>,
}

impl AppState {
    /// Creates a new AppState around an existing cache.
    pub fn new(cache: LruCache<String>) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Must be called from within a tokio runtime, which hosts the sweeper.
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let cache = LruCache::new(config.cache_config())?;
        Ok(Self::new(cache))
    }
}

/// Handler for PUT /set
///
/// Stores a key-value pair and echoes the stored value.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let stored = state.cache.set(req.key.clone(), req.value);

    Ok(Json(SetResponse::new(req.key, stored)))
}

/// Handler for GET /get/:key
///
/// Retrieves a value from the cache by key, refreshing its TTL.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let value = state.cache.get(&key)?;

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for GET /has/:key
///
/// Reports whether a key is live. A positive answer refreshes its TTL.
pub async fn has_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<HasResponse> {
    let exists = state.cache.has(&key);

    Json(HasResponse::new(key, exists))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.stats();

    Json(StatsResponse::new(&stats, state.cache.config().item_limit))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
