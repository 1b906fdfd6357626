//! API Handlers
//!
//! HTTP request handlers for the admin endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::{CacheManager, Region, StatsSnapshot};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::models::{
    validate_key, ClearResponse, DeleteResponse, GetResponse, HealthResponse, PutRequest,
    PutResponse,
};

/// Application state shared across all handlers.
///
/// Holds a handle to the one cache manager built at startup.
#[derive(Clone)]
pub struct AppState {
    /// Shared cache manager
    pub cache: Arc<CacheManager>,
}

impl AppState {
    /// Creates a new AppState around an existing manager.
    pub fn new(cache: Arc<CacheManager>) -> Self {
        Self { cache }
    }

    /// Creates a new AppState with a fresh manager built from configuration.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(Arc::new(CacheManager::new(config)))
    }
}

/// Parses and validates the `:region/:key` path segments.
fn parse_target(region: &str, key: &str) -> Result<Region> {
    let region: Region = region.parse()?;
    if let Some(error_msg) = validate_key(key) {
        return Err(CacheError::InvalidRequest(error_msg));
    }
    Ok(region)
}

/// Handler for GET /regions/:region/:key
///
/// Reads a value; counts toward hit/miss statistics.
pub async fn get_handler(
    State(state): State<AppState>,
    Path((region, key)): Path<(String, String)>,
) -> Result<Json<GetResponse>> {
    let region = parse_target(&region, &key)?;
    let value = state
        .cache
        .get(region, &key)
        .ok_or_else(|| CacheError::NotFound(key.clone()))?;

    Ok(Json(GetResponse::new(region, key, value)))
}

/// Handler for PUT /regions/:region/:key
///
/// Stores the request's value under the key.
pub async fn put_handler(
    State(state): State<AppState>,
    Path((region, key)): Path<(String, String)>,
    Json(req): Json<PutRequest>,
) -> Result<Json<PutResponse>> {
    let region = parse_target(&region, &key)?;
    state.cache.put(region, key.clone(), req.value);

    Ok(Json(PutResponse::new(region, key)))
}

/// Handler for DELETE /regions/:region/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path((region, key)): Path<(String, String)>,
) -> Result<Json<DeleteResponse>> {
    let region = parse_target(&region, &key)?;
    if !state.cache.delete(region, &key) {
        return Err(CacheError::NotFound(key));
    }

    Ok(Json(DeleteResponse::new(region, key)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsSnapshot> {
    Json(state.cache.stats_snapshot())
}

/// Handler for POST /clear
///
/// Empties every region; the removed entries are counted as evictions.
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    Json(ClearResponse::new(state.cache.clear_all()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
