//! Cache Statistics Module
//!
//! Process-wide hit, miss and eviction counters shared by every region.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::cache::Region;

// == Stats Aggregator ==
/// Lock-free counters for cache performance metrics.
///
/// Updates never contend with region locks. Counters only grow, except
/// through [`StatsAggregator::reset`].
#[derive(Debug, Default)]
pub struct StatsAggregator {
    /// Number of successful cache retrievals
    hits: AtomicU64,
    /// Number of failed cache retrievals (key not found or expired)
    misses: AtomicU64,
    /// Number of entries removed by manual clears
    evictions: AtomicU64,
}

impl StatsAggregator {
    // == Constructor ==
    /// Creates a new aggregator with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Hit ==
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    // == Record Miss ==
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    // == Record Evictions ==
    /// Adds `count` to the eviction counter.
    pub fn record_evictions(&self, count: u64) {
        self.evictions.fetch_add(count, Ordering::Relaxed);
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn evictions(&self) -> u64 {
        self.evictions.load(Ordering::Relaxed)
    }

    // == Reset ==
    /// Zeroes every counter.
    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.evictions.store(0, Ordering::Relaxed);
    }

    // == Snapshot ==
    /// Reads the counters and combines them with per-region occupancy.
    pub fn snapshot(&self, region_sizes: BTreeMap<Region, usize>) -> StatsSnapshot {
        let hits = self.hits();
        let misses = self.misses();

        StatsSnapshot {
            total_requests: hits + misses,
            hits,
            misses,
            evictions: self.evictions(),
            hit_rate_percent: hit_rate_percent(hits, misses),
            region_sizes,
        }
    }
}

// == Stats Snapshot ==
/// Point-in-time view of cache statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSnapshot {
    /// Hits plus misses
    pub total_requests: u64,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    /// Hits as a percentage of requests, rounded to two decimals
    pub hit_rate_percent: f64,
    /// Current number of stored entries per region
    pub region_sizes: BTreeMap<Region, usize>,
}

// == Hit Rate ==
/// Calculates `hits / (hits + misses) * 100`, rounded to two decimals.
///
/// Returns 0.0 if no requests have been made.
pub fn hit_rate_percent(hits: u64, misses: u64) -> f64 {
    let total = hits + misses;
    if total == 0 {
        0.0
    } else {
        let percent = hits as f64 / total as f64 * 100.0;
        (percent * 100.0).round() / 100.0
    }
}
