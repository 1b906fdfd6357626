//! Configuration Module
//!
//! Handles loading per-region cache limits and server settings from
//! environment variables. Configuration is read once; the manager built from
//! it cannot be reconfigured at runtime.

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cache::{EvictionMode, Region};

/// Capacity and TTL for a single region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionConfig {
    /// Target maximum number of entries
    pub capacity: usize,
    /// Idle lifetime of an entry in seconds
    pub ttl_seconds: u64,
}

impl RegionConfig {
    pub const fn new(capacity: usize, ttl_seconds: u64) -> Self {
        Self {
            capacity,
            ttl_seconds,
        }
    }

    /// Reads `<PREFIX>_CACHE_CAPACITY` and `<PREFIX>_CACHE_TTL`, falling back
    /// to `default` for anything missing or unparseable.
    fn from_env(prefix: &str, default: RegionConfig) -> Self {
        Self {
            capacity: env_or(&format!("{}_CACHE_CAPACITY", prefix), default.capacity),
            ttl_seconds: env_or(&format!("{}_CACHE_TTL", prefix), default.ttl_seconds),
        }
    }
}

/// Limits for every region plus the shared overflow policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Medicine lookups: 500 entries, 2 hours
    pub medicine: RegionConfig,
    /// OCR results: 1000 entries, 30 minutes
    pub ocr: RegionConfig,
    /// LLM responses: 200 entries, 1 hour
    pub llm: RegionConfig,
    /// Agent responses: 300 entries, 1 hour
    pub agent: RegionConfig,
    /// User session context: 1000 entries, 4 hours
    pub user_context: RegionConfig,
    /// Overflow policy applied to all regions
    pub eviction: EvictionMode,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            medicine: RegionConfig::new(500, 7200),
            ocr: RegionConfig::new(1000, 1800),
            llm: RegionConfig::new(200, 3600),
            agent: RegionConfig::new(300, 3600),
            user_context: RegionConfig::new(1000, 14400),
            eviction: EvictionMode::ExpiredOnly,
        }
    }
}

impl CacheConfig {
    /// Returns the limits configured for `region`.
    pub fn region(&self, region: Region) -> RegionConfig {
        match region {
            Region::Medicine => self.medicine,
            Region::Ocr => self.ocr,
            Region::Llm => self.llm,
            Region::Agent => self.agent,
            Region::UserContext => self.user_context,
        }
    }

    /// Loads region limits from the environment.
    ///
    /// # Environment Variables
    /// - `MEDICINE_CACHE_CAPACITY` / `MEDICINE_CACHE_TTL` (default: 500 / 7200)
    /// - `OCR_CACHE_CAPACITY` / `OCR_CACHE_TTL` (default: 1000 / 1800)
    /// - `LLM_CACHE_CAPACITY` / `LLM_CACHE_TTL` (default: 200 / 3600)
    /// - `AGENT_CACHE_CAPACITY` / `AGENT_CACHE_TTL` (default: 300 / 3600)
    /// - `USER_CONTEXT_CACHE_CAPACITY` / `USER_CONTEXT_CACHE_TTL` (default: 1000 / 14400)
    /// - `CACHE_EVICTION` - `expired-only` or `strict` (default: expired-only)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            medicine: RegionConfig::from_env("MEDICINE", defaults.medicine),
            ocr: RegionConfig::from_env("OCR", defaults.ocr),
            llm: RegionConfig::from_env("LLM", defaults.llm),
            agent: RegionConfig::from_env("AGENT", defaults.agent),
            user_context: RegionConfig::from_env("USER_CONTEXT", defaults.user_context),
            eviction: env_or("CACHE_EVICTION", defaults.eviction),
        }
    }
}

/// Server configuration parameters.
#[derive(Debug, Clone)]
pub struct Config {
    /// Per-region cache limits
    pub cache: CacheConfig,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// See [`CacheConfig::from_env`] for the cache variables; `SERVER_PORT`
    /// sets the admin HTTP port (default: 3000).
    pub fn from_env() -> Self {
        Self {
            cache: CacheConfig::from_env(),
            server_port: env_or("SERVER_PORT", 3000),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            server_port: 3000,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
