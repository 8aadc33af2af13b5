//! Display formatting for catalog records
//!
//! Everything here is pure: no I/O, no caching, and every function returns a
//! value for any input.

use serde::Serialize;

use crate::models::{Pokemon, PokemonSummary, TypeSummary};

pub const NO_ABILITY: &str = "No ability found!";
pub const NO_TYPE: &str = "No type found!";
pub const NO_SPRITE: &str = "-";
pub const EVOLUTION_SEPARATOR: &str = " → ";

/// Stats shown in the basic details block, in display order
const BASIC_STATS: [&str; 3] = ["hp", "attack", "defense"];

/// Pokémon ready for display
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormattedPokemon {
    pub name: String,
    pub height: u32,
    pub weight: u32,
    pub abilities: String,
    pub types: String,
    pub stats: Vec<FormattedStat>,
    pub sprite: String,
}

impl FormattedPokemon {
    /// Base value of a stat, looked up case-insensitively by raw or formatted name
    pub fn stat(&self, name: &str) -> Option<u32> {
        self.stats
            .iter()
            .find(|stat| stat.name.eq_ignore_ascii_case(name))
            .map(|stat| stat.base_stat)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormattedStat {
    pub name: String,
    pub base_stat: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormattedPokemonSummary {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormattedType {
    pub name: String,
}

/// First character upper-cased, the rest lower-cased. Blank input yields "".
pub fn format_name(input: &str) -> String {
    if input.trim().is_empty() {
        return String::new();
    }

    let mut chars = input.chars();
    match chars.next() {
        Some(first) => {
            let mut output = String::with_capacity(input.len());
            output.push(upper_char(first));
            output.extend(chars.flat_map(char::to_lowercase));
            output
        }
        None => String::new(),
    }
}

// Single-char uppercase so the result stays stable on a second pass ('ß' stays 'ß').
fn upper_char(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// Sorts the non-empty names, formats them and joins with ", ".
/// Falls back to `placeholder` when nothing is left.
pub fn join_names<'a>(names: impl IntoIterator<Item = Option<&'a str>>, placeholder: &str) -> String {
    let mut names: Vec<&str> = names
        .into_iter()
        .flatten()
        .filter(|name| !name.is_empty())
        .collect();

    if names.is_empty() {
        return placeholder.to_string();
    }

    names.sort_unstable();
    names
        .into_iter()
        .map(format_name)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn format_abilities(pokemon: &Pokemon) -> String {
    join_names(
        pokemon
            .abilities
            .iter()
            .map(|a| a.ability.as_ref().map(|r| r.name.as_str())),
        NO_ABILITY,
    )
}

pub fn format_types(pokemon: &Pokemon) -> String {
    join_names(
        pokemon
            .types
            .iter()
            .map(|t| t.type_ref.as_ref().map(|r| r.name.as_str())),
        NO_TYPE,
    )
}

/// Stats with a name, in source order
pub fn format_stats(pokemon: &Pokemon) -> Vec<FormattedStat> {
    pokemon
        .stats
        .iter()
        .filter_map(|stat| {
            let name = stat.stat.as_ref()?.name.as_str();
            if name.is_empty() {
                return None;
            }
            Some(FormattedStat {
                name: format_name(name),
                base_stat: stat.base_stat,
            })
        })
        .collect()
}

/// Front sprite URL, or [`NO_SPRITE`] when missing or blank
pub fn format_sprite(pokemon: &Pokemon) -> String {
    pokemon
        .sprites
        .as_ref()
        .and_then(|s| s.front_default.as_deref())
        .filter(|url| !url.trim().is_empty())
        .unwrap_or(NO_SPRITE)
        .to_string()
}

pub fn format_pokemon(pokemon: &Pokemon) -> FormattedPokemon {
    FormattedPokemon {
        name: format_name(&pokemon.name),
        height: pokemon.height,
        weight: pokemon.weight,
        abilities: format_abilities(pokemon),
        types: format_types(pokemon),
        stats: format_stats(pokemon),
        sprite: format_sprite(pokemon),
    }
}

/// `Evolution: Bulbasaur → Ivysaur → Venusaur`
pub fn format_evolution<S: AsRef<str>>(names: &[S]) -> String {
    let chain = names
        .iter()
        .map(|name| format_name(name.as_ref()))
        .collect::<Vec<_>>()
        .join(EVOLUTION_SEPARATOR);
    format!("Evolution: {}", chain)
}

pub fn format_type_members(members: &[PokemonSummary]) -> Vec<FormattedPokemonSummary> {
    members
        .iter()
        .map(|p| FormattedPokemonSummary {
            name: format_name(&p.name),
        })
        .collect()
}

pub fn format_type_list(types: &[TypeSummary]) -> Vec<FormattedType> {
    types
        .iter()
        .map(|t| FormattedType {
            name: format_name(&t.name),
        })
        .collect()
}

/// One page of `items`; an out-of-range page is empty.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page_size == 0 {
        return &[];
    }
    let start = page.saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Attribute/value text block for one Pokémon: basic details, then the
/// remaining stats, abilities, types and image URL.
pub fn render_pokemon(pokemon: &FormattedPokemon) -> String {
    let mut rows: Vec<(String, String)> = vec![
        ("Name".to_string(), pokemon.name.clone()),
        ("Height".to_string(), pokemon.height.to_string()),
        ("Weight".to_string(), pokemon.weight.to_string()),
    ];

    for stat in BASIC_STATS {
        let label = if stat == "hp" {
            "HP".to_string()
        } else {
            format_name(stat)
        };
        let value = pokemon
            .stat(stat)
            .map(|v| v.to_string())
            .unwrap_or_else(|| NO_SPRITE.to_string());
        rows.push((label, value));
    }

    rows.push(("Abilities".to_string(), pokemon.abilities.clone()));
    rows.push(("Types".to_string(), pokemon.types.clone()));

    for stat in &pokemon.stats {
        if !BASIC_STATS
            .iter()
            .any(|basic| basic.eq_ignore_ascii_case(&stat.name))
        {
            rows.push((stat.name.clone(), stat.base_stat.to_string()));
        }
    }

    rows.push(("Image URL".to_string(), pokemon.sprite.clone()));

    let width = rows
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);

    let mut output = String::new();
    for (label, value) in rows {
        output.push_str(&format!("{:<width$}  {}\n", label, value, width = width));
    }
    output
}

#[cfg(test)]
#[path = "formatters_tests.rs"]
mod tests;
