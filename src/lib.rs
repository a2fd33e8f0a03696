//! TTL Cache - A concurrent in-memory key-value cache
//!
//! Entries carry an optional time-to-live. Expired entries are removed
//! lazily on access and periodically by a background sweep.

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{Cache, StatsSnapshot};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
