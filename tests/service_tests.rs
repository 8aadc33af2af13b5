//! End-to-end tests: service facade -> cached repository -> HTTP mock

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use pokedex::{
    Cache, CatalogClient, CatalogConfig, CatalogRepository, Clock, MemoryCache, PokedexService,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TTL: Duration = Duration::from_secs(600);

struct ManualClock {
    start: Instant,
    offset: Mutex<Duration>,
}

impl ManualClock {
    fn advance(&self, by: Duration) {
        *self.offset.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.start + *self.offset.lock().unwrap()
    }
}

fn service_for(server: &MockServer) -> (PokedexService, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock {
        start: Instant::now(),
        offset: Mutex::new(Duration::ZERO),
    });
    let config = CatalogConfig::default()
        .with_base_url(format!("{}/api/v2/", server.uri()))
        .with_cache_ttl(TTL);
    let cache: Arc<dyn Cache> = Arc::new(MemoryCache::with_clock(Arc::clone(&clock)));
    let repository = CatalogRepository::new(CatalogClient::new(&config), cache, config.cache_ttl);
    (PokedexService::new(repository), clock)
}

async fn mount_bulbasaur(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v2/pokemon/bulbasaur"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "bulbasaur",
            "height": 7,
            "weight": 69,
            "abilities": [
                { "ability": { "name": "overgrow", "url": "" } },
                { "ability": { "name": "chlorophyll", "url": "" } }
            ],
            "types": [
                { "type": { "name": "grass", "url": "" } },
                { "type": { "name": "poison", "url": "" } }
            ],
            "stats": [
                { "base_stat": 45, "stat": { "name": "hp", "url": "" } },
                { "base_stat": 49, "stat": { "name": "attack", "url": "" } }
            ],
            "species": {
                "name": "bulbasaur",
                "url": format!("{}/api/v2/pokemon-species/1/", server.uri())
            },
            "sprites": { "front_default": null }
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/pokemon-species/1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "evolution_chain": { "url": format!("{}/api/v2/evolution-chain/1/", server.uri()) }
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/evolution-chain/1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "chain": {
                "species": { "name": "bulbasaur", "url": "" },
                "evolves_to": [{
                    "species": { "name": "ivysaur", "url": "" },
                    "evolves_to": [{ "species": { "name": "venusaur", "url": "" }, "evolves_to": [] }]
                }]
            }
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn pokemon_lookup_end_to_end() {
    let mock_server = MockServer::start().await;
    mount_bulbasaur(&mock_server).await;
    let (service, _clock) = service_for(&mock_server);

    let pokemon = service.pokemon("Bulbasaur").await.unwrap();

    assert_eq!(pokemon.name, "Bulbasaur");
    assert_eq!(pokemon.abilities, "Chlorophyll, Overgrow");
    assert_eq!(pokemon.types, "Grass, Poison");
    assert_eq!(pokemon.stat("hp"), Some(45));
    assert_eq!(pokemon.sprite, "-");
}

#[tokio::test]
async fn evolution_end_to_end() {
    let mock_server = MockServer::start().await;
    mount_bulbasaur(&mock_server).await;
    let (service, _clock) = service_for(&mock_server);

    let evolution = service.evolution("bulbasaur").await.unwrap();

    assert_eq!(evolution, "Evolution: Bulbasaur → Ivysaur → Venusaur");
}

#[tokio::test]
async fn cache_serves_repeat_lookups_until_ttl_expires() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/type"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [ { "name": "fire", "url": "" }, { "name": "water", "url": "" } ]
        })))
        .mount(&mock_server)
        .await;

    let (service, clock) = service_for(&mock_server);

    service.types().await.unwrap();
    clock.advance(TTL / 2);
    let types = service.types().await.unwrap();
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 1);

    let names: Vec<_> = types.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Fire", "Water"]);

    clock.advance(TTL);
    service.types().await.unwrap();
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn null_body_surfaces_as_failure_naming_the_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/pokemon/agumon"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&mock_server)
        .await;

    let (service, _clock) = service_for(&mock_server);

    let err = service.pokemon("agumon").await.unwrap_err();
    assert!(err.message().contains("agumon"));

    let err = service.evolution("agumon").await.unwrap_err();
    assert_eq!(err.message(), "Pokémon agumon not found!");
}

#[tokio::test]
async fn server_error_is_reported_not_panicked() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&mock_server)
        .await;

    let (service, _clock) = service_for(&mock_server);

    let err = service.pokemon_by_type("fire").await.unwrap_err();
    assert!(err.message().starts_with("HTTP request error:"));
    assert!(err.message().contains("502"));
}
