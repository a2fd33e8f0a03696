//! Configuration Module
//!
//! Handles loading cache configuration from environment variables.

use std::env;
use std::time::Duration;

/// Default interval between background sweeps, in milliseconds.
pub const DEFAULT_CLEANUP_INTERVAL_MS: u64 = 1000;

/// Cache configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// How often the background task sweeps expired entries
    pub cleanup_interval: Duration,
}

impl CacheConfig {
    /// Creates a config with an explicit cleanup interval.
    pub fn new(cleanup_interval: Duration) -> Self {
        Self { cleanup_interval }
    }

    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CLEANUP_INTERVAL_MS` - Sweep frequency in milliseconds (default: 1000)
    pub fn from_env() -> Self {
        let interval_ms = env::var("CLEANUP_INTERVAL_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_CLEANUP_INTERVAL_MS);

        Self {
            cleanup_interval: Duration::from_millis(interval_ms),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cleanup_interval: Duration::from_millis(DEFAULT_CLEANUP_INTERVAL_MS),
        }
    }
}
