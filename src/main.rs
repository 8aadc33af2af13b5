//! Pokédex command-line front end
//!
//! Thin wrapper over [`PokedexService`]: one lookup per invocation, failures
//! are printed as warnings.

use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use pokedex::formatters::{paginate, render_pokemon};
use pokedex::{CatalogConfig, PokedexService};

/// Entries shown per page when listing a type
const PAGE_SIZE: usize = 10;

/// Look up Pokémon, types and evolutions from the PokeAPI catalog
#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(version, about, long_about = None)]
struct Args {
    /// Base URL of the catalog API
    #[arg(long)]
    base_url: Option<String>,

    /// Seconds a successful response stays cached
    #[arg(long)]
    cache_ttl_secs: Option<u64>,

    /// Per-request deadline in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show details for one Pokémon
    Pokemon { name: String },
    /// List Pokémon of a type
    Type {
        name: String,
        /// Page to show, starting at 1
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
        page: u64,
    },
    /// Show the evolution chain of a Pokémon
    Evolution { name: String },
    /// List all types
    Types,
}

impl Args {
    /// Environment settings, overridden by any flags given.
    fn config(&self) -> CatalogConfig {
        let mut config = CatalogConfig::from_env();
        if let Some(url) = &self.base_url {
            config = config.with_base_url(url.clone());
        }
        if let Some(secs) = self.cache_ttl_secs {
            config = config.with_cache_ttl(Duration::from_secs(secs));
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_request_timeout(Some(Duration::from_secs(secs)));
        }
        config
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Set RUST_LOG to control verbosity, e.g. RUST_LOG=pokedex=debug
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let service = PokedexService::from_config(&args.config());

    let outcome = match &args.command {
        Command::Pokemon { name } => service
            .pokemon(name)
            .await
            .map(|pokemon| print!("{}", render_pokemon(&pokemon))),
        Command::Type { name, page } => service.pokemon_by_type(name).await.map(|pokemon| {
            let page = usize::try_from(*page).unwrap_or(usize::MAX);
            let shown = paginate(&pokemon, page - 1, PAGE_SIZE);
            if shown.is_empty() {
                println!("There are no more Pokémon to display.");
                return;
            }
            println!("Pokémon of type {} (page {}):", name, page);
            for entry in shown {
                println!("  {}", entry.name);
            }
            if page.saturating_mul(PAGE_SIZE) < pokemon.len() {
                println!("Next page: --page {}", page + 1);
            }
        }),
        Command::Evolution { name } => service
            .evolution(name)
            .await
            .map(|evolution| println!("{}", evolution)),
        Command::Types => service.types().await.map(|types| {
            for t in types {
                println!("{}", t.name);
            }
        }),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::warn!("Lookup failed: {}", e);
            eprintln!("Warning: {}", e);
            ExitCode::FAILURE
        }
    }
}
