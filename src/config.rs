//! Runtime configuration for the catalog client and cache

use std::time::Duration;

/// Base URL of the public PokeAPI
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2/";

/// How long a successful response stays in the cache
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(10 * 60);

/// Longest TTL accepted; larger values are clamped to this
pub const MAX_CACHE_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

pub const DEFAULT_USER_AGENT: &str = "Pokedex/0.1";

/// Settings shared by the client, the cache and the service facade
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub base_url: String,
    pub cache_ttl: Duration,
    /// Per-request deadline; `None` leaves it to the transport default
    pub request_timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            cache_ttl: DEFAULT_CACHE_TTL,
            request_timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl CatalogConfig {
    /// Defaults overlaid with `POKEDEX_BASE_URL`, `POKEDEX_CACHE_TTL_SECS`
    /// and `POKEDEX_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        Self::default().overlay(|key| std::env::var(key).ok())
    }

    fn overlay(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup("POKEDEX_BASE_URL") {
            if !url.trim().is_empty() {
                self.base_url = url.trim().to_string();
            }
        }
        if let Some(secs) = lookup("POKEDEX_CACHE_TTL_SECS") {
            match secs.trim().parse::<u64>() {
                Ok(secs) => self = self.with_cache_ttl(Duration::from_secs(secs)),
                Err(e) => log::warn!("Ignoring POKEDEX_CACHE_TTL_SECS={}: {}", secs, e),
            }
        }
        if let Some(secs) = lookup("POKEDEX_TIMEOUT_SECS") {
            match secs.trim().parse::<u64>() {
                Ok(secs) => self.request_timeout = Some(Duration::from_secs(secs)),
                Err(e) => log::warn!("Ignoring POKEDEX_TIMEOUT_SECS={}: {}", secs, e),
            }
        }
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the cache TTL, clamped to [`MAX_CACHE_TTL`].
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        if ttl > MAX_CACHE_TTL {
            log::warn!(
                "Cache TTL {:?} exceeds the maximum, using {:?}",
                ttl,
                MAX_CACHE_TTL
            );
        }
        self.cache_ttl = ttl.min(MAX_CACHE_TTL);
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }
}
