//! Cache Module
//!
//! Multi-region in-memory caching with per-region capacity and TTL, lazy
//! expiration, shared hit/miss statistics, deterministic key derivation and
//! standalone memoization.

mod clock;
mod entry;
mod key;
mod manager;
mod memoize;
mod region;
mod stats;


// Re-export public types
pub use clock::{current_timestamp_ms, Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use key::{cache_key, CacheKeyBuilder};
pub use manager::{CacheManager, Region};
pub use memoize::{memoize, Memoized};
pub use region::{EvictionMode, RegionCache};
pub use stats::{hit_rate_percent, StatsAggregator, StatsSnapshot};

// == Public Constants ==
/// Maximum allowed key length in bytes on the HTTP surface
pub const MAX_KEY_LENGTH: usize = 256;
