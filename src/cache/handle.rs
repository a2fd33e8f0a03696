//! Cache Handle Module
//!
//! The public cache type: a store plus the cleanup task that reclaims it.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::cache::{CacheStore, StatsSnapshot};
use crate::config::CacheConfig;
use crate::error::Result;
use crate::tasks::{spawn_cleanup_task, CleanupTask};

// == Cache ==
/// A concurrent in-memory cache with per-entry TTL.
///
/// Creating a cache starts its background sweep. The sweep runs until
/// [`Cache::stop`] is called or the cache is dropped. Share a cache between
/// threads with `Arc<Cache<V>>` or scoped threads.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use ttl_cache::Cache;
///
/// let cache = Cache::new(Duration::from_millis(100)).unwrap();
/// cache.set("foo", "bar", Duration::from_secs(1));
/// assert_eq!(cache.get("foo"), Some("bar"));
///
/// cache.delete("foo");
/// assert_eq!(cache.get("foo"), None);
/// cache.stop();
/// ```
#[derive(Debug)]
pub struct Cache<V> {
    store: Arc<CacheStore<V>>,
    cleanup: Mutex<CleanupTask>,
}

impl<V> Cache<V>
where
    V: Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates an empty cache and starts its background sweep.
    ///
    /// # Errors
    /// Fails if `cleanup_interval` is zero or too large to schedule, or if the
    /// cleanup thread cannot start.
    pub fn new(cleanup_interval: Duration) -> Result<Self> {
        let store = Arc::new(CacheStore::new());
        let cleanup = spawn_cleanup_task(store.clone(), cleanup_interval)?;

        Ok(Self {
            store,
            cleanup: Mutex::new(cleanup),
        })
    }

    /// Creates a cache from configuration.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        Self::new(config.cleanup_interval)
    }
}

impl<V> Cache<V> {
    /// Stores `value` under `key`, replacing any existing entry.
    ///
    /// The entry expires `ttl` from now; a zero `ttl` never expires.
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        self.store.set(key, value, ttl);
    }

    /// Removes `key`, returning true if an entry was present.
    pub fn delete(&self, key: &str) -> bool {
        self.store.delete(key)
    }

    /// Returns true if `key` holds an unexpired entry.
    pub fn contains_key(&self, key: &str) -> bool {
        self.store.contains_key(key)
    }

    /// Number of stored entries, including expired ones not yet reclaimed.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Sweeps expired entries now, returning how many were removed.
    pub fn cleanup_expired(&self) -> usize {
        self.store.cleanup_expired()
    }

    /// Returns a snapshot of hits, misses, expirations and sweeps.
    pub fn stats(&self) -> StatsSnapshot {
        self.store.stats()
    }

    // == Lifecycle ==
    /// Stops the background sweep and waits for it to exit.
    ///
    /// Safe to call more than once. The cache stays usable afterwards, but
    /// expired entries are then only reclaimed by `get`.
    pub fn stop(&self) {
        self.cleanup
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .stop();
    }

    /// Returns true while the background sweep is alive.
    pub fn is_running(&self) -> bool {
        self.cleanup
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_running()
    }
}

impl<V: Clone> Cache<V> {
    /// Returns a clone of the value under `key`, or None if absent or expired.
    ///
    /// Reading an expired entry removes it.
    pub fn get(&self, key: &str) -> Option<V> {
        self.store.get(key)
    }
}

impl<V> Drop for Cache<V> {
    fn drop(&mut self) {
        self.stop();
    }
}
