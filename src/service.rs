//! Pokémon data service: the facade consumed by the command-line front end
//!
//! Queries are normalized, handed to the repository, and successful records
//! are shaped by the formatters. Failures pass through unchanged.

use std::sync::Arc;

use crate::api::CatalogClient;
use crate::cache::{Cache, MemoryCache};
use crate::config::CatalogConfig;
use crate::error::{CatalogError, Result};
use crate::formatters::{
    format_evolution, format_pokemon, format_type_list, format_type_members, FormattedPokemon,
    FormattedPokemonSummary, FormattedType,
};
use crate::repository::{CatalogRepository, PokemonRepository};

pub struct PokedexService<R = CatalogRepository> {
    repository: R,
}

impl PokedexService<CatalogRepository> {
    /// Wires a catalog client and a fresh in-memory cache from `config`.
    pub fn from_config(config: &CatalogConfig) -> Self {
        let client = CatalogClient::new(config);
        let cache: Arc<dyn Cache> = Arc::new(MemoryCache::new());
        log::info!(
            "Pokédex service using {} (cache TTL {:?})",
            client.base_url(),
            config.cache_ttl
        );
        Self::new(CatalogRepository::new(client, cache, config.cache_ttl))
    }
}

impl<R: PokemonRepository> PokedexService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub async fn pokemon(&self, name: &str) -> Result<FormattedPokemon> {
        let name = normalize_query(name, "name")?;
        let pokemon = self.repository.pokemon(&name).await?;
        Ok(format_pokemon(&pokemon))
    }

    pub async fn pokemon_by_type(&self, type_name: &str) -> Result<Vec<FormattedPokemonSummary>> {
        let type_name = normalize_query(type_name, "type")?;
        let membership = self.repository.pokemon_by_type(&type_name).await?;
        Ok(format_type_members(&membership.pokemon))
    }

    /// Looks up the Pokémon, follows its species to the evolution chain and
    /// renders it as `Evolution: A → B → C`.
    pub async fn evolution(&self, name: &str) -> Result<String> {
        let name = normalize_query(name, "name")?;
        let pokemon = self.repository.pokemon(&name).await?;

        let species_url = pokemon.species.url.trim();
        if species_url.is_empty() {
            return Err(CatalogError::NotFound(format!(
                "Species data not found: {}",
                name
            )));
        }

        let names = self.repository.evolution(species_url).await?;
        Ok(format_evolution(&names))
    }

    pub async fn types(&self) -> Result<Vec<FormattedType>> {
        let types = self.repository.types().await?;
        Ok(format_type_list(&types))
    }
}

/// Trimmed, lower-cased query; blank input is rejected.
pub fn normalize_query(input: &str, what: &str) -> Result<String> {
    let query = input.trim().to_lowercase();
    if query.is_empty() {
        return Err(CatalogError::InvalidInput(format!(
            "Invalid {}. Please try again.",
            what
        )));
    }
    Ok(query)
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
