//! Medcache - multi-region in-memory cache
//!
//! Named cache regions with per-region capacity and TTL, lazy expiration,
//! shared hit/miss statistics, deterministic cache keys and standalone
//! memoization, plus an optional admin HTTP surface.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::{CacheKeyBuilder, CacheManager, Region};
pub use config::{CacheConfig, Config};
pub use error::{CacheError, Result};
