//! Process-lifetime cache for catalog responses

pub mod memory_cache;

pub use memory_cache::{cached_fetch, Cache, CachedValue, Clock, MemoryCache, SystemClock};
