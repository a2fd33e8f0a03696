//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A stored value plus its absolute expiration instant.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Expiration instant, None = never expires
    pub expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry whose expiry is fixed relative to `now`.
    ///
    /// A zero `ttl` produces an entry that never expires, as does a `ttl`
    /// so large that `now + ttl` cannot be represented.
    pub fn new(value: V, ttl: Duration, now: Instant) -> Self {
        let expires_at = if ttl.is_zero() {
            None
        } else {
            now.checked_add(ttl)
        };

        Self { value, expires_at }
    }

    // == Is Expired ==
    /// Checks whether the entry has expired as of `now`.
    ///
    /// An entry is expired once `now` reaches its expiration instant, so an
    /// entry is only live while its expiry is strictly in the future.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }

    /// Checks whether the entry has expired as of the current instant.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    // == Time To Live ==
    /// Returns the remaining lifetime, or None if the entry never expires.
    ///
    /// Returns `Some(Duration::ZERO)` once the entry has expired.
    pub fn ttl_remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|expires| expires.saturating_duration_since(Instant::now()))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_entry_creation_no_ttl() {
        let entry = CacheEntry::new("test_value", Duration::ZERO, Instant::now());

        assert_eq!(entry.value, "test_value");
        assert!(entry.expires_at.is_none());
        assert!(!entry.is_expired());
        assert!(entry.ttl_remaining().is_none());
    }

    #[test]
    fn test_entry_creation_with_ttl() {
        let now = Instant::now();
        let entry = CacheEntry::new(7u32, Duration::from_secs(60), now);

        assert_eq!(entry.expires_at, Some(now + Duration::from_secs(60)));
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_expiration() {
        let entry = CacheEntry::new("v", Duration::from_millis(20), Instant::now());
        assert!(!entry.is_expired());

        sleep(Duration::from_millis(40));

        assert!(entry.is_expired());
        assert_eq!(entry.ttl_remaining(), Some(Duration::ZERO));
    }

    #[test]
    fn test_ttl_remaining() {
        let entry = CacheEntry::new("v", Duration::from_secs(10), Instant::now());

        let remaining = entry.ttl_remaining().unwrap();
        assert!(remaining <= Duration::from_secs(10));
        assert!(remaining >= Duration::from_secs(9));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = Instant::now();
        let entry = CacheEntry {
            value: "test",
            expires_at: Some(now),
        };

        assert!(entry.is_expired_at(now), "Entry should be expired at boundary");
        assert!(entry.is_expired_at(now + Duration::from_millis(1)));
    }

    #[test]
    fn test_entry_live_before_expiry() {
        let now = Instant::now();
        let entry = CacheEntry {
            value: "test",
            expires_at: Some(now + Duration::from_millis(5)),
        };

        assert!(!entry.is_expired_at(now));
    }

    #[test]
    fn test_overflowing_ttl_never_expires() {
        let entry = CacheEntry::new("v", Duration::MAX, Instant::now());
        assert!(entry.expires_at.is_none());
    }
}
