//! Pokédex - cached access to the PokeAPI catalog
//!
//! Fetches Pokémon, type and evolution data over HTTP, keeps successful
//! responses in a TTL cache, resolves evolution chains and formats the
//! results for display.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod evolution;
pub mod formatters;
pub mod models;
pub mod repository;
pub mod service;

// Re-export commonly used items
pub use api::CatalogClient;
pub use cache::{Cache, Clock, MemoryCache, SystemClock};
pub use config::CatalogConfig;
pub use error::{CatalogError, Result};
pub use formatters::{FormattedPokemon, FormattedPokemonSummary, FormattedStat, FormattedType};
pub use repository::{CatalogRepository, PokemonRepository};
pub use service::PokedexService;
