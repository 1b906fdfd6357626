//! Region Cache Module
//!
//! A single bounded cache region: HashMap storage guarded by one mutex, a
//! uniform TTL refreshed on every access, lazy expiration and least-recently
//! accessed eviction on overflow.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cache::{CacheEntry, Clock, SystemClock};

// == Eviction Mode ==
/// What a full region does with its least recently accessed entry on `put`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EvictionMode {
    /// Remove the oldest entry only if it has already expired.
    ///
    /// A full region whose oldest entry is still live accepts the new entry
    /// anyway, so occupancy can exceed capacity.
    #[default]
    ExpiredOnly,
    /// Always remove the oldest entry when inserting a new key into a full
    /// region. Occupancy never exceeds capacity.
    Strict,
}

impl FromStr for EvictionMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "expired-only" | "expired_only" => Ok(Self::ExpiredOnly),
            "strict" => Ok(Self::Strict),
            other => Err(format!("unknown eviction mode '{}'", other)),
        }
    }
}

// == Region Cache ==
/// Bounded, TTL-gated key/value store for one named region.
///
/// All state lives behind a single mutex. The critical sections only touch the
/// map and compare timestamps, so callers never wait on I/O or user code.
#[derive(Debug)]
pub struct RegionCache<V> {
    /// Region name, used in log output
    name: String,
    /// Target maximum number of entries
    capacity: usize,
    /// Idle lifetime of an entry in seconds
    ttl_seconds: u64,
    /// Overflow policy
    eviction: EvictionMode,
    /// Key-value storage
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
    /// Time source
    clock: Arc<dyn Clock>,
}

impl<V: Clone> RegionCache<V> {
    // == Constructor ==
    /// Creates a region using the system clock and `ExpiredOnly` eviction.
    ///
    /// # Arguments
    /// * `name` - Region name for diagnostics
    /// * `capacity` - Target maximum number of entries
    /// * `ttl_seconds` - Idle lifetime of an entry
    pub fn new(name: impl Into<String>, capacity: usize, ttl_seconds: u64) -> Self {
        Self::with_clock(name, capacity, ttl_seconds, Arc::new(SystemClock))
    }

    /// Creates a region that reads time from `clock`.
    pub fn with_clock(
        name: impl Into<String>,
        capacity: usize,
        ttl_seconds: u64,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            name: name.into(),
            capacity,
            ttl_seconds,
            eviction: EvictionMode::default(),
            entries: Mutex::new(HashMap::with_capacity(capacity)),
            clock,
        }
    }

    /// Sets the overflow policy.
    pub fn with_eviction(mut self, eviction: EvictionMode) -> Self {
        self.eviction = eviction;
        self
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns `None` if the key is absent or its entry has expired; an expired
    /// entry is removed as a side effect. A live entry has its access time
    /// refreshed.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now_ms();
        let ttl_ms = self.ttl_ms();
        let mut entries = self.entries.lock();

        match entries.get_mut(key) {
            None => return None,
            Some(entry) if !entry.is_expired(now, ttl_ms) => {
                entry.touch(now);
                return Some(entry.value.clone());
            }
            Some(_) => {}
        }

        entries.remove(key);
        debug!(region = %self.name, key, "Lazily expired entry");
        None
    }

    // == Put ==
    /// Stores a value, overwriting any existing entry for `key`.
    ///
    /// When the region is at or above capacity, the entry with the oldest
    /// access time is considered for eviction according to the region's
    /// [`EvictionMode`]. The insert itself always succeeds.
    ///
    /// Returns the key that was evicted to make room, if any.
    pub fn put(&self, key: impl Into<String>, value: V) -> Option<String> {
        let key = key.into();
        let now = self.clock.now_ms();
        let ttl_ms = self.ttl_ms();
        let mut entries = self.entries.lock();

        let mut evicted = None;
        if entries.len() >= self.capacity {
            let candidate = entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_access_ms)
                .map(|(k, entry)| (k.clone(), entry.is_expired(now, ttl_ms)));

            if let Some((oldest, oldest_expired)) = candidate {
                let remove = match self.eviction {
                    EvictionMode::ExpiredOnly => oldest_expired,
                    // Overwrites don't grow the map
                    EvictionMode::Strict => !entries.contains_key(&key),
                };
                if remove {
                    entries.remove(&oldest);
                    evicted = Some(oldest);
                }
            }
        }

        match entries.get_mut(&key) {
            Some(entry) => {
                entry.value = value;
                entry.touch(now);
            }
            None => {
                entries.insert(key, CacheEntry::new(value, now));
            }
        }

        if entries.len() > self.capacity {
            debug!(
                region = %self.name,
                len = entries.len(),
                capacity = self.capacity,
                "Region above capacity, oldest entry still live"
            );
        }

        evicted
    }
}

impl<V> RegionCache<V> {
    // == Delete ==
    /// Removes an entry by key.
    ///
    /// Returns whether an entry was removed.
    pub fn delete(&self, key: &str) -> bool {
        self.entries.lock().remove(key).is_some()
    }

    // == Clear ==
    /// Removes all entries.
    ///
    /// Returns the number of entries removed.
    pub fn clear(&self) -> usize {
        let mut entries = self.entries.lock();
        let count = entries.len();
        entries.clear();
        count
    }

    // == Contains Key ==
    /// Checks for a stored entry without refreshing or expiring it.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.lock().contains_key(key)
    }

    // == Length ==
    /// Returns the current number of stored entries, including expired ones
    /// that have not been discovered yet.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    pub fn eviction(&self) -> EvictionMode {
        self.eviction
    }

    fn ttl_ms(&self) -> u64 {
        self.ttl_seconds.saturating_mul(1000)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;

    fn region(capacity: usize, ttl: u64) -> (RegionCache<u32>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(1_000_000));
        let cache = RegionCache::with_clock("test", capacity, ttl, clock.clone());
        (cache, clock)
    }

    #[test]
    fn test_region_new() {
        let cache: RegionCache<String> = RegionCache::new("medicine", 500, 7200);
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        assert_eq!(cache.name(), "medicine");
        assert_eq!(cache.capacity(), 500);
        assert_eq!(cache.ttl_seconds(), 7200);
        assert_eq!(cache.eviction(), EvictionMode::ExpiredOnly);
    }

    #[test]
    fn test_put_and_get() {
        let (cache, _) = region(10, 60);

        cache.put("key1", 1);
        assert_eq!(cache.get("key1"), Some(1));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_get_nonexistent() {
        let (cache, _) = region(10, 60);
        assert_eq!(cache.get("nonexistent"), None);
    }

    #[test]
    fn test_overwrite() {
        let (cache, _) = region(10, 60);

        cache.put("key1", 1);
        cache.put("key1", 2);

        assert_eq!(cache.get("key1"), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_delete() {
        let (cache, _) = region(10, 60);

        cache.put("key1", 1);
        assert!(cache.delete("key1"));
        assert!(!cache.delete("key1"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear_returns_count() {
        let (cache, _) = region(10, 60);

        cache.put("a", 1);
        cache.put("b", 2);

        assert_eq!(cache.clear(), 2);
        assert!(cache.is_empty());
        assert_eq!(cache.clear(), 0);
    }

    #[test]
    fn test_ttl_expiration_is_lazy() {
        let (cache, clock) = region(10, 60);

        cache.put("key1", 1);
        clock.advance_secs(61);

        // Still stored until someone looks at it
        assert!(cache.contains_key("key1"));
        assert_eq!(cache.get("key1"), None);
        assert!(!cache.contains_key("key1"));
    }

    #[test]
    fn test_ttl_boundary_is_inclusive() {
        let (cache, clock) = region(10, 60);

        cache.put("key1", 1);
        clock.advance_secs(60);
        assert_eq!(cache.get("key1"), Some(1));
    }

    #[test]
    fn test_get_refreshes_access_time() {
        let (cache, clock) = region(10, 60);

        cache.put("key1", 1);
        for _ in 0..10 {
            clock.advance_secs(50);
            assert_eq!(cache.get("key1"), Some(1));
        }

        clock.advance_secs(61);
        assert_eq!(cache.get("key1"), None);
    }

    #[test]
    fn test_overwrite_refreshes_access_time() {
        let (cache, clock) = region(10, 60);

        cache.put("key1", 1);
        clock.advance_secs(50);
        cache.put("key1", 2);
        clock.advance_secs(50);

        assert_eq!(cache.get("key1"), Some(2));
    }

    #[test]
    fn test_full_region_keeps_live_entries() {
        let (cache, clock) = region(2, 60);

        cache.put("A", 1);
        clock.advance_ms(10);
        cache.put("B", 2);
        clock.advance_ms(10);
        assert_eq!(cache.get("A"), Some(1));
        clock.advance_ms(10);

        // B is the oldest but still live, so nothing is removed
        assert_eq!(cache.put("C", 3), None);

        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get("A"), Some(1));
        assert_eq!(cache.get("B"), Some(2));
        assert_eq!(cache.get("C"), Some(3));
    }

    #[test]
    fn test_full_region_evicts_expired_oldest() {
        let (cache, clock) = region(2, 60);

        cache.put("A", 1);
        clock.advance_secs(30);
        cache.put("B", 2);
        clock.advance_secs(31);

        // A has been idle 61s, B only 31s
        assert_eq!(cache.put("C", 3), Some("A".to_string()));
        assert_eq!(cache.len(), 2);
        assert!(!cache.contains_key("A"));
        assert!(cache.contains_key("B"));
    }

    #[test]
    fn test_only_one_expired_entry_removed_per_put() {
        let (cache, clock) = region(3, 60);

        cache.put("A", 1);
        clock.advance_ms(1);
        cache.put("B", 2);
        clock.advance_ms(1);
        cache.put("C", 3);
        clock.advance_secs(120);

        cache.put("D", 4);
        assert_eq!(cache.len(), 3);
        assert!(!cache.contains_key("A"));
        assert!(cache.contains_key("B"));
    }

    #[test]
    fn test_strict_eviction_removes_live_oldest() {
        let (cache, clock) = region(2, 60);
        let cache = cache.with_eviction(EvictionMode::Strict);

        cache.put("A", 1);
        clock.advance_ms(10);
        cache.put("B", 2);
        clock.advance_ms(10);
        cache.get("A");
        clock.advance_ms(10);

        assert_eq!(cache.put("C", 3), Some("B".to_string()));
        assert_eq!(cache.len(), 2);
        assert!(cache.contains_key("A"));
        assert!(cache.contains_key("C"));
    }

    #[test]
    fn test_strict_overwrite_does_not_evict() {
        let (cache, clock) = region(2, 60);
        let cache = cache.with_eviction(EvictionMode::Strict);

        cache.put("A", 1);
        clock.advance_ms(10);
        cache.put("B", 2);
        clock.advance_ms(10);

        assert_eq!(cache.put("B", 3), None);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("A"), Some(1));
    }

    #[test]
    fn test_zero_capacity_region_still_accepts() {
        let (cache, _) = region(0, 60);

        cache.put("A", 1);
        assert_eq!(cache.get("A"), Some(1));
    }

    #[test]
    fn test_eviction_mode_from_str() {
        assert_eq!("strict".parse::<EvictionMode>(), Ok(EvictionMode::Strict));
        assert_eq!(
            "Expired-Only".parse::<EvictionMode>(),
            Ok(EvictionMode::ExpiredOnly)
        );
        assert!("lfu".parse::<EvictionMode>().is_err());
    }
}
