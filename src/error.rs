//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use std::time::Duration;

use thiserror::Error;

// == Cache Error Enum ==
/// Errors raised while constructing a cache.
///
/// Once a cache is running, `set`, `get` and `delete` never fail.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The cleanup interval is zero or too large to schedule
    #[error("Invalid cleanup interval: {0:?} (must be greater than zero and fit the clock)")]
    InvalidCleanupInterval(Duration),

    /// The cleanup worker thread or its timer runtime could not be started
    #[error("Failed to start cleanup task: {0}")]
    Runtime(#[from] std::io::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
