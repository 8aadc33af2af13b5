//! Tests for the in-memory TTL cache.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use super::{cached_fetch, Cache, Clock, MemoryCache};
use crate::error::CatalogError;

/// Clock that only moves when told to.
struct ManualClock {
    start: Instant,
    offset: Mutex<Duration>,
}

impl ManualClock {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            start: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        })
    }

    fn advance(&self, by: Duration) {
        *self.offset.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.start + *self.offset.lock().unwrap()
    }
}

const TTL: Duration = Duration::from_secs(600);

fn cache_with_clock() -> (MemoryCache<Arc<ManualClock>>, Arc<ManualClock>) {
    let clock = ManualClock::new();
    (MemoryCache::with_clock(Arc::clone(&clock)), clock)
}

#[test]
fn get_missing_key() {
    let cache = MemoryCache::new();
    assert!(cache.get("pikachu").is_none());
    assert!(cache.is_empty());
}

#[test]
fn set_then_get_typed() {
    let (cache, _clock) = cache_with_clock();
    let cache: &dyn Cache = &cache;

    cache.set_typed("types", vec!["fire".to_string(), "water".to_string()], TTL);

    let hit = cache.get_typed::<Vec<String>>("types").unwrap();
    assert_eq!(*hit, vec!["fire", "water"]);
    assert_eq!(cache.len(), 1);
}

#[test]
fn type_mismatch_is_a_miss() {
    let (cache, _clock) = cache_with_clock();
    let cache: &dyn Cache = &cache;

    cache.set_typed("fire", 42u32, TTL);

    assert!(cache.get_typed::<String>("fire").is_none());
    assert_eq!(*cache.get_typed::<u32>("fire").unwrap(), 42);
}

#[test]
fn entry_expires_after_ttl() {
    let (cache, clock) = cache_with_clock();
    let cache_ref: &dyn Cache = &cache;
    cache_ref.set_typed("pikachu", "electric".to_string(), TTL);

    clock.advance(TTL - Duration::from_secs(1));
    assert!(cache_ref.get("pikachu").is_some());

    clock.advance(Duration::from_secs(1));
    assert!(cache_ref.get("pikachu").is_none());
    assert_eq!(cache.len(), 0);
}

#[test]
fn expired_entry_is_evicted_on_access() {
    let (cache, clock) = cache_with_clock();
    cache.set("a", Arc::new(1u8), TTL);
    cache.set("b", Arc::new(2u8), TTL * 2);

    clock.advance(TTL + Duration::from_secs(1));

    // "a" is still stored until someone looks at it
    assert_eq!(cache.entries.read().unwrap().len(), 2);
    assert!(cache.get("a").is_none());
    assert_eq!(cache.entries.read().unwrap().len(), 1);
    assert!(cache.get("b").is_some());
}

#[test]
fn set_overwrites_and_refreshes_ttl() {
    let (cache, clock) = cache_with_clock();
    let cache: &dyn Cache = &cache;

    cache.set_typed("k", 1u32, TTL);
    clock.advance(TTL - Duration::from_secs(10));
    cache.set_typed("k", 2u32, TTL);
    clock.advance(Duration::from_secs(20));

    assert_eq!(*cache.get_typed::<u32>("k").unwrap(), 2);
}

#[test]
fn remove_and_clear() {
    let (cache, _clock) = cache_with_clock();
    cache.set("a", Arc::new(1u8), TTL);
    cache.set("b", Arc::new(2u8), TTL);

    assert!(cache.remove("a"));
    assert!(!cache.remove("a"));
    assert_eq!(cache.len(), 1);

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn purge_expired() {
    let (cache, clock) = cache_with_clock();
    cache.set("short", Arc::new(1u8), Duration::from_secs(1));
    cache.set("long", Arc::new(2u8), TTL);

    clock.advance(Duration::from_secs(5));

    assert_eq!(cache.purge_expired(), 1);
    assert_eq!(cache.len(), 1);
}

#[test]
fn concurrent_readers_and_writers() {
    let cache = Arc::new(MemoryCache::new());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let cache = Arc::clone(&cache);
            std::thread::spawn(move || {
                for j in 0..100 {
                    let key = format!("key-{}", j % 10);
                    cache.set(&key, Arc::new(i * 1000 + j), TTL);
                    let _ = cache.get(&key);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(cache.len(), 10);
}

// ── cached_fetch ─────────────────────────────────────────────────────

#[tokio::test]
async fn cached_fetch_calls_source_once_within_ttl() {
    let (cache, clock) = cache_with_clock();
    let calls = AtomicUsize::new(0);
    let counter = &calls;

    let fetch = move || async move {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok::<_, CatalogError>("bulbasaur".to_string())
    };

    let first = cached_fetch(&cache, "bulbasaur", TTL, fetch).await.unwrap();
    let second = cached_fetch(&cache, "bulbasaur", TTL, fetch).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    clock.advance(TTL);
    cached_fetch(&cache, "bulbasaur", TTL, fetch).await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn cached_fetch_does_not_cache_failures() {
    let cache = MemoryCache::new();
    let calls = AtomicUsize::new(0);
    let counter = &calls;

    let failing = move || async move {
        counter.fetch_add(1, Ordering::SeqCst);
        Err::<String, _>(CatalogError::NotFound("Pokémon missingno not found!".to_string()))
    };

    let err = cached_fetch(&cache, "missingno", TTL, failing).await.unwrap_err();
    assert_eq!(err.message(), "Pokémon missingno not found!");
    assert!(cache.is_empty());

    cached_fetch(&cache, "missingno", TTL, failing).await.unwrap_err();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn cached_fetch_with_out_of_range_ttl_returns_value_uncached() {
    let cache = MemoryCache::new();

    let value = cached_fetch(&cache, "pikachu", Duration::from_secs(u64::MAX), || async {
        Ok::<_, CatalogError>(1u32)
    })
    .await
    .unwrap();

    assert_eq!(value, 1);
    assert!(cache.is_empty());
}

#[test]
fn set_with_out_of_range_ttl_keeps_cache_usable() {
    let (cache, _clock) = cache_with_clock();
    cache.set("a", Arc::new(1u8), Duration::MAX);
    cache.set("b", Arc::new(2u8), TTL);

    assert!(cache.get("a").is_none());
    assert!(cache.get("b").is_some());
    assert_eq!(cache.len(), 1);
}
