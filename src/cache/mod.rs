//! Cache Module
//!
//! Provides the in-memory TTL cache and its background reclamation.

mod entry;
mod handle;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use handle::Cache;
pub use stats::{CacheStats, StatsSnapshot};
pub use store::CacheStore;
