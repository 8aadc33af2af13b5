use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use crate::error::Result;

/// Type-erased cached value. Each caller downcasts to the record it stored.
pub type CachedValue = Arc<dyn Any + Send + Sync>;

/// Key/value store with per-entry time-to-live
///
/// Implementations must be safe to share between concurrent requests.
pub trait Cache: Send + Sync {
    /// Returns the value for `key`, or `None` if absent or expired.
    fn get(&self, key: &str) -> Option<CachedValue>;

    fn set(&self, key: &str, value: CachedValue, ttl: Duration);

    /// Removes `key`, returning whether a live entry was dropped.
    fn remove(&self, key: &str) -> bool;

    fn clear(&self);

    /// Number of live (unexpired) entries
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> dyn Cache + 'a {
    /// Typed lookup. An entry holding a different type counts as a miss.
    pub fn get_typed<T: Any + Send + Sync>(&self, key: &str) -> Option<Arc<T>> {
        match self.get(key)?.downcast::<T>() {
            Ok(value) => Some(value),
            Err(_) => {
                log::debug!("Cache entry {} holds a different type, ignoring", key);
                None
            }
        }
    }

    pub fn set_typed<T: Any + Send + Sync>(&self, key: &str, value: T, ttl: Duration) {
        self.set(key, Arc::new(value), ttl);
    }
}

/// Source of "now" for expiry checks
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

struct Entry {
    value: CachedValue,
    expires_at: Instant,
}

/// In-memory [`Cache`] with lazy eviction: expired entries are dropped the
/// next time they are looked up.
pub struct MemoryCache<C: Clock = SystemClock> {
    entries: RwLock<HashMap<String, Entry>>,
    clock: C,
}

impl Default for MemoryCache<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCache<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<C: Clock> MemoryCache<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
        }
    }

    /// Drops every expired entry, returning how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.write();
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        before - entries.len()
    }

    // A panic while holding the lock cannot leave the map half-updated,
    // so a poisoned lock is still usable.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Entry>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Entry>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl<C: Clock> Cache for MemoryCache<C> {
    fn get(&self, key: &str) -> Option<CachedValue> {
        let now = self.clock.now();
        {
            let entries = self.read();
            match entries.get(key) {
                None => return None,
                Some(entry) if entry.expires_at > now => return Some(Arc::clone(&entry.value)),
                Some(_) => {}
            }
        }

        // Expired: re-check under the write lock, another request may have refreshed it.
        let mut entries = self.write();
        match entries.get(key) {
            Some(entry) if entry.expires_at > now => Some(Arc::clone(&entry.value)),
            Some(_) => {
                entries.remove(key);
                log::debug!("Evicted expired cache entry {}", key);
                None
            }
            None => None,
        }
    }

    fn set(&self, key: &str, value: CachedValue, ttl: Duration) {
        let Some(expires_at) = self.clock.now().checked_add(ttl) else {
            log::warn!("Not caching {}: TTL {:?} is out of range", key, ttl);
            return;
        };
        self.write()
            .insert(key.to_string(), Entry { value, expires_at });
        log::debug!("Cached {} for {:?}", key, ttl);
    }

    fn remove(&self, key: &str) -> bool {
        let now = self.clock.now();
        self.write()
            .remove(key)
            .is_some_and(|entry| entry.expires_at > now)
    }

    fn clear(&self) {
        self.write().clear();
    }

    fn len(&self) -> usize {
        let now = self.clock.now();
        self.read()
            .values()
            .filter(|entry| entry.expires_at > now)
            .count()
    }
}

/// Cache-aside lookup: returns the cached value for `key` if present,
/// otherwise runs `fetch` and caches the result only when it succeeds.
pub async fn cached_fetch<T, F, Fut>(
    cache: &dyn Cache,
    key: &str,
    ttl: Duration,
    fetch: F,
) -> Result<T>
where
    T: Clone + Send + Sync + 'static,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    if let Some(hit) = cache.get_typed::<T>(key) {
        log::debug!("Cache hit for {}", key);
        return Ok(T::clone(&hit));
    }

    log::debug!("Cache miss for {}", key);
    let value = fetch().await?;
    cache.set_typed(key, value.clone(), ttl);
    Ok(value)
}

#[cfg(test)]
#[path = "memory_cache_tests.rs"]
mod tests;
