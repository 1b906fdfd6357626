//! Cache Manager Module
//!
//! Owns the fixed set of named regions and is the only writer of the global
//! hit/miss/eviction statistics.
//!
//! The manager is constructed explicitly and shared by handle (`Arc`); there is
//! no process-global instance.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, trace};

use crate::cache::{Clock, RegionCache, StatsAggregator, StatsSnapshot, SystemClock};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};

// == Region ==
/// The semantic domains the cache is partitioned into.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    /// Medicine information lookups
    Medicine,
    /// OCR results keyed by image hash
    Ocr,
    /// LLM responses keyed by prompt hash
    Llm,
    /// Agent responses keyed by query hash
    Agent,
    /// Per-user session context
    UserContext,
}

impl Region {
    /// Every region, in snapshot order.
    pub const ALL: [Region; 5] = [
        Region::Medicine,
        Region::Ocr,
        Region::Llm,
        Region::Agent,
        Region::UserContext,
    ];

    /// The region's name, also used as its key prefix.
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Medicine => "medicine",
            Region::Ocr => "ocr",
            Region::Llm => "llm",
            Region::Agent => "agent",
            Region::UserContext => "user_context",
        }
    }

    /// Prefixes a raw identifier with the region name.
    pub fn key(&self, id: &str) -> String {
        format!("{}:{}", self.as_str(), id)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        Region::ALL
            .into_iter()
            .find(|region| region.as_str() == s)
            .ok_or_else(|| CacheError::UnknownRegion(s.to_string()))
    }
}

// == Cache Manager ==
/// Registry of named cache regions with shared statistics.
///
/// Values are opaque to the manager; `V` only needs to be cloneable so a hit
/// can hand out a copy. Wrap large values in `Arc` to make that cheap.
#[derive(Debug)]
pub struct CacheManager<V = serde_json::Value> {
    medicine: RegionCache<V>,
    ocr: RegionCache<V>,
    llm: RegionCache<V>,
    agent: RegionCache<V>,
    user_context: RegionCache<V>,
    stats: StatsAggregator,
}

impl<V: Clone> CacheManager<V> {
    // == Constructor ==
    /// Creates a manager whose regions read the system clock.
    pub fn new(config: &CacheConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a manager whose regions all share `clock`.
    pub fn with_clock(config: &CacheConfig, clock: Arc<dyn Clock>) -> Self {
        let build = |region: Region| {
            let settings = config.region(region);
            RegionCache::with_clock(
                region.as_str(),
                settings.capacity,
                settings.ttl_seconds,
                Arc::clone(&clock),
            )
            .with_eviction(config.eviction)
        };

        Self {
            medicine: build(Region::Medicine),
            ocr: build(Region::Ocr),
            llm: build(Region::Llm),
            agent: build(Region::Agent),
            user_context: build(Region::UserContext),
            stats: StatsAggregator::new(),
        }
    }

    // == Region Lookup ==
    /// Returns the cache backing `region`.
    pub fn region(&self, region: Region) -> &RegionCache<V> {
        match region {
            Region::Medicine => &self.medicine,
            Region::Ocr => &self.ocr,
            Region::Llm => &self.llm,
            Region::Agent => &self.agent,
            Region::UserContext => &self.user_context,
        }
    }

    // == Get ==
    /// Reads `key` from `region`, recording a hit or a miss.
    pub fn get(&self, region: Region, key: &str) -> Option<V> {
        let value = self.region(region).get(key);
        if value.is_some() {
            self.stats.record_hit();
            trace!(%region, key, "Cache hit");
        } else {
            self.stats.record_miss();
            trace!(%region, key, "Cache miss");
        }
        value
    }

    // == Put ==
    /// Writes `key` into `region`. Writes do not affect statistics.
    pub fn put(&self, region: Region, key: impl Into<String>, value: V) {
        self.region(region).put(key, value);
    }

    // == Delete ==
    /// Removes `key` from `region`, returning whether it was present.
    pub fn delete(&self, region: Region, key: &str) -> bool {
        self.region(region).delete(key)
    }

    // == Named Region Access ==
    /// Reads from a region addressed by name.
    ///
    /// Fails with [`CacheError::UnknownRegion`] if `region` is not one of the
    /// configured names. A miss is `Ok(None)`.
    pub fn get_from_region(&self, region: &str, key: &str) -> Result<Option<V>> {
        let region: Region = region.parse()?;
        Ok(self.get(region, key))
    }

    /// Writes to a region addressed by name.
    pub fn put_into_region(&self, region: &str, key: impl Into<String>, value: V) -> Result<()> {
        let region: Region = region.parse()?;
        self.put(region, key, value);
        Ok(())
    }

    /// Deletes from a region addressed by name.
    pub fn delete_from_region(&self, region: &str, key: &str) -> Result<bool> {
        let region: Region = region.parse()?;
        Ok(self.delete(region, key))
    }

    // == Domain Helpers ==
    /// Caches medicine information. Names are matched case-insensitively.
    pub fn cache_medicine_info(&self, medicine_name: &str, info: V) {
        self.put(Region::Medicine, medicine_key(medicine_name), info);
    }

    pub fn get_cached_medicine_info(&self, medicine_name: &str) -> Option<V> {
        self.get(Region::Medicine, &medicine_key(medicine_name))
    }

    pub fn cache_ocr_result(&self, image_hash: &str, result: V) {
        self.put(Region::Ocr, Region::Ocr.key(image_hash), result);
    }

    pub fn get_cached_ocr_result(&self, image_hash: &str) -> Option<V> {
        self.get(Region::Ocr, &Region::Ocr.key(image_hash))
    }

    pub fn cache_llm_response(&self, prompt_hash: &str, response: V) {
        self.put(Region::Llm, Region::Llm.key(prompt_hash), response);
    }

    pub fn get_cached_llm_response(&self, prompt_hash: &str) -> Option<V> {
        self.get(Region::Llm, &Region::Llm.key(prompt_hash))
    }

    pub fn cache_agent_response(&self, query_hash: &str, response: V) {
        self.put(Region::Agent, Region::Agent.key(query_hash), response);
    }

    pub fn get_cached_agent_response(&self, query_hash: &str) -> Option<V> {
        self.get(Region::Agent, &Region::Agent.key(query_hash))
    }

    pub fn cache_user_context(&self, user_id: &str, context: V) {
        self.put(Region::UserContext, Region::UserContext.key(user_id), context);
    }

    pub fn get_cached_user_context(&self, user_id: &str) -> Option<V> {
        self.get(Region::UserContext, &Region::UserContext.key(user_id))
    }

    // == Stats ==
    /// Returns global counters and per-region occupancy.
    pub fn stats_snapshot(&self) -> StatsSnapshot {
        let sizes: BTreeMap<Region, usize> = Region::ALL
            .into_iter()
            .map(|region| (region, self.region(region).len()))
            .collect();
        self.stats.snapshot(sizes)
    }

    /// Zeroes hit, miss and eviction counters without touching cached data.
    pub fn reset_stats(&self) {
        self.stats.reset();
        info!("Cache statistics reset");
    }

    // == Clear All ==
    /// Empties every region and counts the removed entries as evictions.
    ///
    /// Hit and miss counters are left untouched. Returns the number of entries
    /// removed.
    pub fn clear_all(&self) -> u64 {
        let cleared: u64 = Region::ALL
            .into_iter()
            .map(|region| self.region(region).clear() as u64)
            .sum();
        self.stats.record_evictions(cleared);
        info!(cleared, "Cleared all cache regions");
        cleared
    }
}

fn medicine_key(medicine_name: &str) -> String {
    Region::Medicine.key(&medicine_name.to_lowercase())
}
