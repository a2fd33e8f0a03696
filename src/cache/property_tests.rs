//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the store against a plain HashMap model.

use proptest::prelude::*;
use std::collections::HashMap;
use std::thread::sleep;
use std::time::Duration;

use crate::cache::CacheStore;

// == Test Configuration ==
/// Long enough that nothing expires while a case runs
const LONG_TTL: Duration = Duration::from_secs(3600);

// == Strategies ==
/// Generates cache keys from a small alphabet so operations collide
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-e]{1,2}"
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,32}"
}

/// Zero means "never expires", anything else is effectively forever here
fn ttl_strategy() -> impl Strategy<Value = Duration> {
    prop_oneof![Just(Duration::ZERO), Just(LONG_TTL)]
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String, ttl: Duration },
    Get { key: String },
    Delete { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy(), ttl_strategy())
            .prop_map(|(key, value, ttl)| CacheOp::Set { key, value, ttl }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        key_strategy().prop_map(|key| CacheOp::Delete { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Any sequence of unexpiring operations behaves like a HashMap, and the
    // hit/miss counters match what the model predicts.
    #[test]
    fn prop_matches_hashmap_model(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let store = CacheStore::new();
        let mut model: HashMap<String, String> = HashMap::new();
        let mut expected_hits = 0u64;
        let mut expected_misses = 0u64;

        for op in ops {
            match op {
                CacheOp::Set { key, value, ttl } => {
                    store.set(key.clone(), value.clone(), ttl);
                    model.insert(key, value);
                }
                CacheOp::Get { key } => {
                    let expected = model.get(&key).cloned();
                    if expected.is_some() {
                        expected_hits += 1;
                    } else {
                        expected_misses += 1;
                    }
                    prop_assert_eq!(store.get(&key), expected);
                }
                CacheOp::Delete { key } => {
                    prop_assert_eq!(store.delete(&key), model.remove(&key).is_some());
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.total_entries, model.len(), "Total entries mismatch");
    }

    // Storing V1 then V2 under one key leaves exactly V2.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy(),
        ttl in ttl_strategy(),
    ) {
        let store = CacheStore::new();

        store.set(key.clone(), value1, ttl);
        store.set(key.clone(), value2.clone(), ttl);

        prop_assert_eq!(store.get(&key), Some(value2));
        prop_assert_eq!(store.len(), 1);
    }

    // A deleted key is gone immediately, whatever TTL it had.
    #[test]
    fn prop_delete_removes_entry(
        key in key_strategy(),
        value in value_strategy(),
        ttl in ttl_strategy(),
    ) {
        let store = CacheStore::new();

        store.set(key.clone(), value, ttl);
        prop_assert!(store.delete(&key));
        prop_assert_eq!(store.get(&key), None);
    }

    // A sweep never removes unexpired entries.
    #[test]
    fn prop_sweep_keeps_live_entries(
        entries in prop::collection::hash_map(key_strategy(), value_strategy(), 0..20),
    ) {
        let store = CacheStore::new();
        for (key, value) in &entries {
            store.set(key.clone(), value.clone(), LONG_TTL);
        }

        prop_assert_eq!(store.cleanup_expired(), 0);
        prop_assert_eq!(store.len(), entries.len());
    }
}

// Separate proptest block with fewer cases for time-sensitive TTL tests
proptest! {
    #![proptest_config(ProptestConfig::with_cases(5))]

    // After its TTL elapses, a key reads as absent and a sweep finds only
    // the keys get has not already evicted.
    #[test]
    fn prop_ttl_expiration_behavior(
        short_keys in prop::collection::hash_set("s[a-z]{1,4}", 1..10),
        long_key in "l[a-z]{1,4}",
    ) {
        let store = CacheStore::new();
        for key in &short_keys {
            store.set(key.clone(), 1u8, Duration::from_millis(10));
        }
        store.set(long_key.clone(), 2u8, LONG_TTL);

        sleep(Duration::from_millis(25));

        let first = short_keys.iter().next().unwrap();
        prop_assert_eq!(store.get(first), None);
        prop_assert_eq!(store.cleanup_expired(), short_keys.len() - 1);
        prop_assert_eq!(store.get(&long_key), Some(2));
    }
}
