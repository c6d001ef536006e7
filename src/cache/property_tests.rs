//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check store semantics and the key pattern matcher
//! against simple reference models.

use proptest::prelude::*;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::cache::{pattern_matches, CacheStore, ResponseCache, MATCH_ALL};

// == Test Configuration ==
const TEST_DEFAULT_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
/// Keys shaped like the storefront's resource keys
fn key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "(products|categories|families|user|order)-[a-z0-9]{1,6}",
        "site-settings|hero-slides|company-info|reps",
    ]
}

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,32}".prop_map(Value::from),
    ]
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: Value },
    Get { key: String },
    Delete { key: String },
    Invalidate { pattern: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::Set { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        key_strategy().prop_map(|key| CacheOp::Delete { key }),
        "(products|user|order|site)-\\*".prop_map(|pattern| CacheOp::Invalidate { pattern }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Freshly written values are readable before their TTL elapses.
    #[test]
    fn prop_roundtrip_storage(key in key_strategy(), value in value_strategy()) {
        let mut store = CacheStore::new(TEST_DEFAULT_TTL);

        store.set(key.clone(), value.clone());

        prop_assert_eq!(store.get(&key), Some(value));
    }

    // The second write wins and only one entry exists for the key.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        let mut store = CacheStore::new(TEST_DEFAULT_TTL);

        store.set(key.clone(), value1);
        store.set(key.clone(), value2.clone());

        prop_assert_eq!(store.get(&key), Some(value2));
        prop_assert_eq!(store.len(), 1);
    }

    // Missing keys read as absent and leave the store untouched.
    #[test]
    fn prop_miss_has_no_side_effect(
        present in prop::collection::hash_set(key_strategy(), 0..10),
        probe in key_strategy()
    ) {
        prop_assume!(!present.contains(&probe));
        let mut store = CacheStore::new(TEST_DEFAULT_TTL);
        for key in &present {
            store.set(key.clone(), json!(1));
        }

        prop_assert_eq!(store.get(&probe), None);
        prop_assert!(!store.has(&probe));
        prop_assert_eq!(store.len(), present.len());
    }

    // Delete reports whether something was removed and the key stays gone.
    #[test]
    fn prop_delete_removes_entry(key in key_strategy(), value in value_strategy()) {
        let mut store = CacheStore::new(TEST_DEFAULT_TTL);

        store.set(key.clone(), value);

        prop_assert!(store.delete(&key));
        prop_assert_eq!(store.get(&key), None);
        prop_assert!(!store.delete(&key));
    }

    // Pattern invalidation removes exactly the matching keys.
    #[test]
    fn prop_pattern_invalidation_matches_model(
        keys in prop::collection::hash_set(key_strategy(), 0..20),
        prefix in "(products|user|order|site)-"
    ) {
        let mut store = CacheStore::new(TEST_DEFAULT_TTL);
        for key in &keys {
            store.set(key.clone(), json!(key));
        }

        let pattern = format!("{}*", prefix);
        let expected: HashSet<&String> = keys.iter().filter(|k| k.starts_with(&prefix)).collect();

        prop_assert_eq!(store.invalidate_by_pattern(&pattern), expected.len());
        for key in &keys {
            prop_assert_eq!(store.has(key), !expected.contains(key));
        }
    }

    // "*" removes everything and reports the stored count.
    #[test]
    fn prop_match_all_clears(keys in prop::collection::hash_set(key_strategy(), 0..20)) {
        let mut store = CacheStore::new(TEST_DEFAULT_TTL);
        for key in &keys {
            store.set(key.clone(), json!(true));
        }

        prop_assert_eq!(store.invalidate_by_pattern(MATCH_ALL), keys.len());
        for key in &keys {
            prop_assert_eq!(store.get(key), None);
        }
    }

    // The store agrees with a plain HashMap model for any op sequence,
    // and its counters account for every lookup.
    #[test]
    fn prop_store_matches_model(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let mut store = CacheStore::new(TEST_DEFAULT_TTL);
        let mut model: HashMap<String, Value> = HashMap::new();
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    store.set(key.clone(), value.clone());
                    model.insert(key, value);
                }
                CacheOp::Get { key } => {
                    let got = store.get(&key);
                    match model.get(&key) {
                        Some(_) => expected_hits += 1,
                        None => expected_misses += 1,
                    }
                    prop_assert_eq!(got.as_ref(), model.get(&key));
                }
                CacheOp::Delete { key } => {
                    prop_assert_eq!(store.delete(&key), model.remove(&key).is_some());
                }
                CacheOp::Invalidate { pattern } => {
                    let before = model.len();
                    model.retain(|key, _| !pattern_matches(&pattern, key));
                    prop_assert_eq!(store.invalidate_by_pattern(&pattern), before - model.len());
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits);
        prop_assert_eq!(stats.misses, expected_misses);
        prop_assert_eq!(stats.total_entries, model.len());
        prop_assert_eq!(store.len(), model.len());
    }

    // Read-through fetches once per key while the entry stays fresh.
    #[test]
    fn prop_cached_fetch_fetches_once_per_key(keys in prop::collection::vec(key_strategy(), 1..30)) {
        let cache: ResponseCache<Value> = ResponseCache::new(TEST_DEFAULT_TTL);
        let counter = AtomicUsize::new(0);
        let calls = &counter;

        tokio_test::block_on(async {
            for key in &keys {
                let fetched = cache
                    .cached_fetch(
                        key,
                        move || async move {
                            calls.fetch_add(1, Ordering::SeqCst);
                            Ok::<_, ()>(json!("fetched"))
                        },
                        TEST_DEFAULT_TTL,
                    )
                    .await;
                assert_eq!(fetched, Ok(json!("fetched")));
            }
        });

        let distinct: HashSet<&String> = keys.iter().collect();
        prop_assert_eq!(counter.load(Ordering::SeqCst), distinct.len());
    }
}

// Pattern matcher properties
proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_literal_pattern_is_equality(a in "[a-z\\-]{0,12}", b in "[a-z\\-]{0,12}") {
        prop_assert_eq!(pattern_matches(&a, &b), a == b);
    }

    #[test]
    fn prop_trailing_star_is_prefix(prefix in "[a-z\\-]{0,8}", key in "[a-z\\-]{0,12}") {
        let pattern = format!("{}*", prefix);
        prop_assert_eq!(pattern_matches(&pattern, &key), key.starts_with(&prefix));
    }

    #[test]
    fn prop_leading_star_is_suffix(suffix in "[a-z\\-]{0,8}", key in "[a-z\\-]{0,12}") {
        let pattern = format!("*{}", suffix);
        prop_assert_eq!(pattern_matches(&pattern, &key), key.ends_with(&suffix));
    }

    // Replacing any slice of a key with "*" yields a pattern matching that key.
    #[test]
    fn prop_starred_slice_matches_source(
        key in "[a-z0-9\\-]{0,16}",
        a in 0usize..17,
        b in 0usize..17
    ) {
        let (start, end) = (a.min(b).min(key.len()), a.max(b).min(key.len()));
        let pattern = format!("{}*{}", &key[..start], &key[end..]);
        prop_assert!(pattern_matches(&pattern, &key));
    }
}

// == Additional Unit Tests for Edge Cases ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_all_on_empty_store() {
        let mut store: CacheStore<Value> = CacheStore::new(TEST_DEFAULT_TTL);
        assert_eq!(store.invalidate_by_pattern(MATCH_ALL), 0);
    }

    #[test]
    fn test_empty_key_is_stored_like_any_other() {
        let mut store = CacheStore::new(TEST_DEFAULT_TTL);
        store.set("", json!("degenerate"));

        assert_eq!(store.get(""), Some(json!("degenerate")));
        assert!(store.delete(""));
    }
}
