//! HTTP client for the remote Pokémon catalog (PokeAPI)

pub mod client;

pub use client::CatalogClient;
