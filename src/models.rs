//! Records deserialized from the PokeAPI catalog
//!
//! Only the fields the data layer reads are declared; everything else in the
//! payload is ignored by serde.

use serde::{Deserialize, Serialize};

/// `{ "name": ..., "url": ... }` reference used all over the catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct NamedResource {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// One Pokémon resource (`pokemon/{name}`)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Pokemon {
    pub name: String,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub abilities: Vec<PokemonAbility>,
    #[serde(default)]
    pub types: Vec<PokemonType>,
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
    #[serde(default)]
    pub species: NamedResource,
    #[serde(default)]
    pub sprites: Option<Sprites>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PokemonAbility {
    #[serde(default)]
    pub ability: Option<NamedResource>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PokemonType {
    #[serde(default, rename = "type")]
    pub type_ref: Option<NamedResource>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PokemonStat {
    #[serde(default)]
    pub base_stat: u32,
    #[serde(default)]
    pub stat: Option<NamedResource>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
}

/// Species resource; only the evolution chain link is used
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Species {
    #[serde(default)]
    pub evolution_chain: Option<NamedResource>,
    #[serde(default)]
    pub color: Option<NamedResource>,
    #[serde(default)]
    pub habitat: Option<NamedResource>,
}

impl Species {
    /// URL of the evolution chain, if the species links one
    pub fn evolution_chain_url(&self) -> Option<&str> {
        self.evolution_chain
            .as_ref()
            .map(|chain| chain.url.trim())
            .filter(|url| !url.is_empty())
    }
}

/// Evolution chain resource
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EvolutionChain {
    pub chain: EvolutionNode,
}

/// A stage in the evolution tree. The root is the base form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct EvolutionNode {
    #[serde(default)]
    pub species: NamedResource,
    #[serde(default)]
    pub evolves_to: Vec<EvolutionNode>,
}

impl EvolutionNode {
    pub fn new(name: &str, evolves_to: Vec<EvolutionNode>) -> Self {
        Self {
            species: NamedResource {
                name: name.to_string(),
                url: String::new(),
            },
            evolves_to,
        }
    }
}

/// `type/{type}` resource
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TypeDetail {
    #[serde(default)]
    pub pokemon: Option<Vec<TypeSlot>>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TypeSlot {
    pub pokemon: NamedResource,
}

/// `type` listing resource
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TypeListing {
    #[serde(default)]
    pub results: Option<Vec<TypeSummary>>,
}

/// One elemental type in the catalog listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TypeSummary {
    pub name: String,
}

/// A Pokémon referenced by name only
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PokemonSummary {
    pub name: String,
}

/// Which Pokémon belong to a given type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TypeMembership {
    pub type_name: String,
    pub pokemon: Vec<PokemonSummary>,
}

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;
