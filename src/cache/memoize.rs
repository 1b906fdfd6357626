//! Memoization Module
//!
//! Wraps a computation with a private TTL-gated result table.
//!
//! Unlike a region, a memo entry's lifetime runs from when it was computed;
//! reading it does not extend it. The table has no capacity bound and grows
//! with the number of distinct inputs seen, so only wrap computations whose
//! input space is small.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;

use crate::cache::{CacheKeyBuilder, Clock, SystemClock};
use crate::error::Result;

const MEMO_LABEL: &str = "memo";

#[derive(Debug, Clone)]
struct MemoEntry<O> {
    value: O,
    computed_at_ms: u64,
}

// == Memoized ==
/// A computation whose results are reused for `ttl_seconds` after they were
/// produced.
///
/// Inputs are keyed by a hash of their JSON serialization, so structurally
/// equal inputs share a result. The computation runs outside the table lock;
/// two callers racing on the same fresh input may both compute it.
pub struct Memoized<I: ?Sized, O, F> {
    func: F,
    ttl_seconds: u64,
    table: Mutex<HashMap<String, MemoEntry<O>>>,
    clock: Arc<dyn Clock>,
    _input: PhantomData<fn(&I)>,
}

impl<I, O, F> Memoized<I, O, F>
where
    I: Serialize + ?Sized,
    O: Clone,
    F: Fn(&I) -> O,
{
    /// Wraps `func` using the system clock.
    pub fn new(ttl_seconds: u64, func: F) -> Self {
        Self::with_clock(ttl_seconds, func, Arc::new(SystemClock))
    }

    /// Wraps `func`, reading time from `clock`.
    pub fn with_clock(ttl_seconds: u64, func: F, clock: Arc<dyn Clock>) -> Self {
        Self {
            func,
            ttl_seconds,
            table: Mutex::new(HashMap::new()),
            clock,
            _input: PhantomData,
        }
    }

    // == Call ==
    /// Returns the stored result for `input` if it is younger than the TTL,
    /// otherwise runs the computation and stores its result.
    ///
    /// Fails only if `input` cannot be serialized.
    pub fn call(&self, input: &I) -> Result<O> {
        let key = memo_key(input)?;
        let now = self.clock.now_ms();
        let ttl_ms = self.ttl_seconds.saturating_mul(1000);

        if let Some(entry) = self.table.lock().get(&key) {
            if now.saturating_sub(entry.computed_at_ms) < ttl_ms {
                return Ok(entry.value.clone());
            }
        }

        let value = (self.func)(input);
        self.table.lock().insert(
            key,
            MemoEntry {
                value: value.clone(),
                computed_at_ms: now,
            },
        );
        Ok(value)
    }

    // == Invalidate ==
    /// Drops the stored result for `input`, returning whether one existed.
    pub fn invalidate(&self, input: &I) -> Result<bool> {
        let key = memo_key(input)?;
        Ok(self.table.lock().remove(&key).is_some())
    }
}

impl<I: ?Sized, O, F> Memoized<I, O, F> {
    /// Drops every stored result.
    pub fn clear(&self) {
        self.table.lock().clear();
    }

    /// Number of stored results, fresh or stale.
    pub fn len(&self) -> usize {
        self.table.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.lock().is_empty()
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }
}

/// Wraps `func` so results are reused for `ttl_seconds`.
///
/// # Example
/// ```
/// use medcache::cache::memoize;
///
/// let lookup = memoize(3600, |name: &str| name.to_uppercase());
/// assert_eq!(lookup.call("aspirin").unwrap(), "ASPIRIN");
/// assert_eq!(lookup.len(), 1);
/// ```
pub fn memoize<I, O, F>(ttl_seconds: u64, func: F) -> Memoized<I, O, F>
where
    I: Serialize + ?Sized,
    O: Clone,
    F: Fn(&I) -> O,
{
    Memoized::new(ttl_seconds, func)
}

fn memo_key<I: Serialize + ?Sized>(input: &I) -> Result<String> {
    Ok(CacheKeyBuilder::new(MEMO_LABEL).serialized(input)?.build())
}
