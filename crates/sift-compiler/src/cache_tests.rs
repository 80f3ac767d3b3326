use std::sync::Arc;
use std::thread;

use crate::{CacheStats, Error, ParseErrorKind, QueryCache};

#[test]
fn second_lookup_is_a_hit() {
    let cache = QueryCache::new();

    let first = cache.get_or_compile("div > p").unwrap();
    let second = cache.get_or_compile("div > p").unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });
    assert_eq!(cache.len(), 1);
}

#[test]
fn key_is_not_normalized() {
    let cache = QueryCache::new();

    let a = cache.get_or_compile("a").unwrap();
    let spaced = cache.get_or_compile(" a").unwrap();

    assert!(!Arc::ptr_eq(&a, &spaced));
    assert_eq!(a.instructions(), spaced.instructions());
    assert_eq!(cache.stats(), CacheStats { hits: 0, misses: 2 });
    assert_eq!(cache.len(), 2);
}

#[test]
fn failures_are_not_cached() {
    let cache = QueryCache::new();

    for _ in 0..2 {
        let err = cache.get_or_compile("a >").unwrap_err();
        assert!(matches!(
            err,
            Error::Parse(ref e) if e.kind == ParseErrorKind::TrailingCombinator
        ));
    }

    assert!(cache.is_empty());
    assert!(cache.get("a >").is_none());
    assert_eq!(cache.stats(), CacheStats { hits: 0, misses: 2 });
}

#[test]
fn exec_fuel_applies_to_new_entries() {
    let cache = QueryCache::builder().exec_fuel(Some(3)).build();
    assert_eq!(cache.exec_fuel(), Some(3));

    assert!(cache.get_or_compile("a").is_ok());
    let err = cache.get_or_compile("a b c d").unwrap_err();
    assert!(matches!(
        err,
        Error::Parse(ref e) if e.kind == ParseErrorKind::ExecFuelExhausted
    ));
}

#[test]
fn shared_across_threads() {
    let cache = QueryCache::new();

    let queries: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| cache.get_or_compile(".x .y").unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let canonical = cache.get(".x .y").unwrap();
    for query in &queries {
        assert!(Arc::ptr_eq(query, &canonical));
    }
    assert_eq!(cache.len(), 1);
    let stats = cache.stats();
    assert_eq!(stats.hits + stats.misses, 4);
}
