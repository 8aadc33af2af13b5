//! Evolution chain resolution
//!
//! Resolving is a two-step pipeline: the species resource names its evolution
//! chain, and the chain is a tree walked from the base form along the first
//! child of every node. Other branches (Eevee and friends) are not followed.

use std::collections::HashSet;
use std::time::Duration;

use crate::api::CatalogClient;
use crate::cache::{cached_fetch, Cache};
use crate::error::{CatalogError, Result};
use crate::models::{EvolutionChain, EvolutionNode, Species};

/// Names along the first-child path of the tree, base form first.
///
/// The walk stops at a node with a blank species name or at a name already
/// seen, so malformed input can neither add empty entries nor loop.
pub fn walk_first_path(root: &EvolutionNode) -> Vec<String> {
    let mut names = Vec::new();
    let mut visited = HashSet::new();
    let mut current = Some(root);

    while let Some(node) = current {
        let name = node.species.name.trim();
        if name.is_empty() {
            log::debug!("Evolution node without species name, stopping walk");
            break;
        }
        if !visited.insert(name.to_string()) {
            log::warn!("Evolution chain revisits {}, stopping walk", name);
            break;
        }
        names.push(name.to_string());

        if node.evolves_to.len() > 1 {
            log::debug!(
                "{} branches into {} evolutions, following the first",
                name,
                node.evolves_to.len()
            );
        }
        current = node.evolves_to.first();
    }

    names
}

/// Fetch the species at `species_url`, then its evolution chain, and return
/// the ordered evolution names. Both resources are cached under their URL.
pub async fn resolve_evolution(
    client: &CatalogClient,
    cache: &dyn Cache,
    ttl: Duration,
    species_url: &str,
) -> Result<Vec<String>> {
    let species: Species =
        cached_fetch(cache, species_url, ttl, || client.species(species_url)).await?;

    let chain_url = species.evolution_chain_url().ok_or_else(|| {
        CatalogError::NotFound(format!("Evolution chain not found: {}", species_url))
    })?;

    let chain: EvolutionChain =
        cached_fetch(cache, chain_url, ttl, || client.evolution_chain(chain_url)).await?;

    let names = walk_first_path(&chain.chain);
    if names.is_empty() {
        return Err(CatalogError::NotFound("No evolutions found!".to_string()));
    }

    log::debug!("Resolved evolution for {}: {:?}", species_url, names);
    Ok(names)
}

#[cfg(test)]
#[path = "evolution_tests.rs"]
mod tests;
