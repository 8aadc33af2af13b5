//! Cached data access over the catalog client
//!
//! Every lookup probes the cache first and only stores successful fetches.
//! Cache keys: the Pokémon name, the type name, the species/chain URL, and the
//! literal `"types"` for the type catalog.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::api::CatalogClient;
use crate::cache::{cached_fetch, Cache};
use crate::error::{CatalogError, Result};
use crate::evolution::resolve_evolution;
use crate::models::{Pokemon, PokemonSummary, TypeMembership, TypeSummary};

/// Cache key for the full type catalog
pub const TYPES_CACHE_KEY: &str = "types";

/// Raw catalog lookups consumed by the service facade
#[async_trait]
pub trait PokemonRepository: Send + Sync {
    async fn pokemon(&self, name: &str) -> Result<Pokemon>;

    async fn pokemon_by_type(&self, type_name: &str) -> Result<TypeMembership>;

    /// Ordered evolution names for the species at `species_url`
    async fn evolution(&self, species_url: &str) -> Result<Vec<String>>;

    async fn types(&self) -> Result<Vec<TypeSummary>>;
}

/// [`PokemonRepository`] backed by the remote catalog and a shared cache
pub struct CatalogRepository {
    client: CatalogClient,
    cache: Arc<dyn Cache>,
    ttl: Duration,
}

impl CatalogRepository {
    pub fn new(client: CatalogClient, cache: Arc<dyn Cache>, ttl: Duration) -> Self {
        Self { client, cache, ttl }
    }

    pub fn cache(&self) -> &Arc<dyn Cache> {
        &self.cache
    }
}

#[async_trait]
impl PokemonRepository for CatalogRepository {
    async fn pokemon(&self, name: &str) -> Result<Pokemon> {
        cached_fetch(self.cache.as_ref(), name, self.ttl, || self.client.pokemon(name)).await
    }

    async fn pokemon_by_type(&self, type_name: &str) -> Result<TypeMembership> {
        cached_fetch(self.cache.as_ref(), type_name, self.ttl, move || async move {
            let detail = self.client.type_detail(type_name).await?;
            let pokemon: Vec<PokemonSummary> = detail
                .pokemon
                .unwrap_or_default()
                .into_iter()
                .map(|slot| PokemonSummary {
                    name: slot.pokemon.name,
                })
                .collect();

            if pokemon.is_empty() {
                return Err(CatalogError::NotFound(format!(
                    "No Pokémon found for {}!",
                    type_name
                )));
            }

            log::info!("Found {} Pokémon of type {}", pokemon.len(), type_name);
            Ok(TypeMembership {
                type_name: type_name.to_string(),
                pokemon,
            })
        })
        .await
    }

    async fn evolution(&self, species_url: &str) -> Result<Vec<String>> {
        resolve_evolution(&self.client, self.cache.as_ref(), self.ttl, species_url).await
    }

    async fn types(&self) -> Result<Vec<TypeSummary>> {
        cached_fetch(self.cache.as_ref(), TYPES_CACHE_KEY, self.ttl, move || async move {
            let types = self.client.type_listing().await?.results.unwrap_or_default();
            if types.is_empty() {
                return Err(CatalogError::NotFound("No Pokémon types found!".to_string()));
            }
            log::info!("Loaded {} types", types.len());
            Ok(types)
        })
        .await
    }
}

#[cfg(test)]
#[path = "repository_tests.rs"]
mod tests;
