//! API Module
//!
//! Admin HTTP surface over the cache manager: region reads and writes,
//! statistics, clearing and health.
//!
//! # Endpoints
//! - `GET|PUT|DELETE /regions/:region/:key` - Region access
//! - `GET /stats` - Cache statistics
//! - `POST /clear` - Clear all regions
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
