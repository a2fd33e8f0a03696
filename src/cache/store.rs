//! Cache Store Module
//!
//! The locked key-value map shared by callers and the cleanup task.
//! A single reader-writer lock guards the whole map.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use tracing::trace;

use crate::cache::{CacheEntry, CacheStats, StatsSnapshot};

// == Cache Store ==
/// Thread-safe TTL storage.
///
/// Readers on the `get` fast path share the lock; every mutation takes it
/// exclusively. Expired entries may linger until a `get` or a sweep sees them.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
    /// Activity counters
    stats: CacheStats,
}

impl<V> Default for CacheStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            stats: CacheStats::new(),
        }
    }

    // Every mutation is a single map operation, so a poisoned map is still whole.
    fn read_entries(&self) -> RwLockReadGuard<'_, HashMap<String, CacheEntry<V>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_entries(&self) -> RwLockWriteGuard<'_, HashMap<String, CacheEntry<V>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    // == Set ==
    /// Stores a value, replacing any existing entry for `key`.
    ///
    /// The expiry is fixed at call time as `now + ttl`. A zero `ttl` stores
    /// an entry that never expires.
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let entry = CacheEntry::new(value, ttl, Instant::now());
        self.write_entries().insert(key.into(), entry);
    }

    // == Delete ==
    /// Removes `key`. Returns true if an entry was present.
    pub fn delete(&self, key: &str) -> bool {
        self.write_entries().remove(key).is_some()
    }

    // == Cleanup Expired ==
    /// Removes every entry whose expiry is at or before now.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&self) -> usize {
        let now = Instant::now();
        let removed = {
            let mut entries = self.write_entries();
            let before = entries.len();
            entries.retain(|_, entry| !entry.is_expired_at(now));
            before - entries.len()
        };

        self.stats.record_expirations(removed as u64);
        self.stats.record_sweep();
        removed
    }

    // == Contains ==
    /// Returns true if `key` holds an unexpired entry.
    ///
    /// Unlike `get`, this neither clones the value nor touches the stats,
    /// and it leaves expired entries for `get` or the next sweep.
    pub fn contains_key(&self, key: &str) -> bool {
        self.read_entries()
            .get(key)
            .is_some_and(|entry| !entry.is_expired())
    }

    // == Length ==
    /// Returns the number of stored entries, expired or not.
    pub fn len(&self) -> usize {
        self.read_entries().len()
    }

    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.read_entries().is_empty()
    }

    // == Stats ==
    /// Returns a snapshot of the current statistics.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot(self.len())
    }

    // == Remove If Stale ==
    /// Removes `key` only if it still carries the expiry observed earlier.
    ///
    /// A concurrent `set` between the read and this write installs a new
    /// expiry, and that fresher entry must survive.
    fn remove_if_stale(&self, key: &str, observed: Option<Instant>) -> bool {
        let mut entries = self.write_entries();
        let still_stale = entries
            .get(key)
            .is_some_and(|entry| entry.expires_at == observed);

        if still_stale {
            entries.remove(key);
        }
        still_stale
    }
}

impl<V: Clone> CacheStore<V> {
    // == Get ==
    /// Retrieves a clone of the value stored under `key`.
    ///
    /// Returns None if the key is absent or expired. An expired entry is
    /// removed on the way out: the read lock is released, the write lock is
    /// taken, and the entry is dropped only if its expiry is unchanged.
    pub fn get(&self, key: &str) -> Option<V> {
        let observed = {
            let entries = self.read_entries();
            match entries.get(key) {
                None => {
                    self.stats.record_miss();
                    return None;
                }
                Some(entry) if !entry.is_expired() => {
                    self.stats.record_hit();
                    return Some(entry.value.clone());
                }
                Some(entry) => entry.expires_at,
            }
        };

        if self.remove_if_stale(key, observed) {
            trace!(key, "Evicted expired entry on access");
            self.stats.record_expirations(1);
        }
        self.stats.record_miss();
        None
    }
}
