//! Configuration Module
//!
//! Cache construction parameters and the demo server's environment-driven settings.

use std::env;
use std::time::{Duration, Instant};

use tracing::warn;

use crate::error::{CacheError, Result};

/// Default period between two sweeper passes.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_millis(50);

// == Cache Config ==
/// Parameters of a single cache instance.
///
/// Fixed for the lifetime of the cache: the handle keeps its own copy and
/// exposes it read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of live entries
    pub item_limit: usize,
    /// Sliding lifetime granted on creation and on every touch
    pub ttl_millis: u64,
    /// Period of the background sweep
    pub sweep_interval: Duration,
}

impl CacheConfig {
    /// Creates a config with the default sweep interval.
    pub fn new(item_limit: usize, ttl_millis: u64) -> Self {
        Self {
            item_limit,
            ttl_millis,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
        }
    }

    /// Overrides the sweep interval.
    pub fn with_sweep_interval(mut self, sweep_interval: Duration) -> Self {
        self.sweep_interval = sweep_interval;
        self
    }

    /// TTL as a `Duration`.
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_millis)
    }

    // == Validate ==
    /// Rejects configurations the cache cannot honour.
    ///
    /// A sweep interval that is not below the TTL is accepted but logged, since
    /// read-time expiry checks keep lookups exact; only memory reclamation lags.
    pub fn validate(&self) -> Result<()> {
        if self.item_limit == 0 {
            return Err(CacheError::InvalidConfig(
                "item_limit must be greater than zero".to_string(),
            ));
        }
        if self.ttl_millis == 0 {
            return Err(CacheError::InvalidConfig(
                "ttl_millis must be greater than zero".to_string(),
            ));
        }
        if Instant::now().checked_add(self.ttl()).is_none() {
            return Err(CacheError::InvalidConfig(
                "ttl_millis is too large".to_string(),
            ));
        }
        if self.sweep_interval.is_zero() {
            return Err(CacheError::InvalidConfig(
                "sweep_interval must be greater than zero".to_string(),
            ));
        }
        if self.sweep_interval >= self.ttl() {
            warn!(
                "sweep interval {:?} is not shorter than ttl {:?}; expired entries will linger",
                self.sweep_interval,
                self.ttl()
            );
        }
        Ok(())
    }
}

// == Server Config ==
/// Demo server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Maximum number of entries the cache can hold
    pub item_limit: usize,
    /// Sliding TTL in milliseconds
    pub ttl_millis: u64,
    /// Sweeper interval in milliseconds
    pub sweep_interval_ms: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl ServerConfig {
    /// Creates a new ServerConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `ITEM_LIMIT` - Maximum cache entries (default: 1000)
    /// - `TTL_MILLIS` - Sliding TTL in milliseconds (default: 300000)
    /// - `SWEEP_INTERVAL_MS` - Sweep frequency in milliseconds (default: 50)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`ServerConfig::from_env`] but reads variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            item_limit: lookup("ITEM_LIMIT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.item_limit),
            ttl_millis: lookup("TTL_MILLIS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.ttl_millis),
            sweep_interval_ms: lookup("SWEEP_INTERVAL_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.sweep_interval_ms),
            server_port: lookup("SERVER_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
        }
    }

    /// Derives the cache parameters.
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig::new(self.item_limit, self.ttl_millis)
            .with_sweep_interval(Duration::from_millis(self.sweep_interval_ms))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            item_limit: 1000,
            ttl_millis: 300_000,
            sweep_interval_ms: 50,
            server_port: 3000,
        }
    }
}
