//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with access-time tracking.

// == Cache Entry ==
/// Represents a single cache entry with its value and last access time.
///
/// The TTL is owned by the region, not the entry: an entry is stale once the
/// region's TTL has elapsed since `last_access_ms`.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value, opaque to the cache
    pub value: V,
    /// Last time the entry was written or read (Unix milliseconds)
    pub last_access_ms: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry accessed at `now_ms`.
    pub fn new(value: V, now_ms: u64) -> Self {
        Self {
            value,
            last_access_ms: now_ms,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has outlived `ttl_ms` as of `now_ms`.
    ///
    /// Boundary condition: the entry is still live when exactly `ttl_ms` has
    /// elapsed; it expires only once the idle time is strictly greater.
    pub fn is_expired(&self, now_ms: u64, ttl_ms: u64) -> bool {
        self.idle_ms(now_ms) > ttl_ms
    }

    // == Touch ==
    /// Refreshes the last access time.
    ///
    /// Never moves the timestamp backwards, even if the clock does.
    pub fn touch(&mut self, now_ms: u64) {
        self.last_access_ms = self.last_access_ms.max(now_ms);
    }

    // == Idle Time ==
    /// Milliseconds since the entry was last accessed.
    pub fn idle_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.last_access_ms)
    }
}
