//! Typed GET requests against the catalog.
//!
//! Every failure (transport, status, null body, bad JSON, deadline) comes back
//! as a [`CatalogError`]; nothing panics past this layer.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::CatalogConfig;
use crate::error::{CatalogError, Result};
use crate::models::{EvolutionChain, Pokemon, Species, TypeDetail, TypeListing};

/// Client for the remote JSON catalog
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: String,
    user_agent: String,
    request_timeout: Option<Duration>,
}

impl CatalogClient {
    pub fn new(config: &CatalogConfig) -> Self {
        log::debug!("Creating catalog client for {}", config.base_url);
        Self {
            client: Client::new(),
            base_url: config.base_url.clone(),
            user_agent: config.user_agent.clone(),
            request_timeout: config.request_timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URLs are used verbatim, anything else is joined to the base URL.
    pub fn resolve_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Fetch and deserialize one resource. A 404 or null body is `NotFound`.
    pub async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.fetch_with_deadline(path, self.request_timeout).await
    }

    pub async fn fetch_with_deadline<T: DeserializeOwned>(
        &self,
        path: &str,
        deadline: Option<Duration>,
    ) -> Result<T> {
        self.fetch_optional_with_deadline(path, deadline)
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("Resource not found: {}", path)))
    }

    /// Like [`fetch`](Self::fetch) but reports an absent resource as `Ok(None)`
    /// so callers can word their own not-found message.
    pub async fn fetch_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        self.fetch_optional_with_deadline(path, self.request_timeout)
            .await
    }

    pub async fn fetch_optional_with_deadline<T: DeserializeOwned>(
        &self,
        path: &str,
        deadline: Option<Duration>,
    ) -> Result<Option<T>> {
        let url = self.resolve_url(path);
        let request = self.get_json::<T>(&url);

        let outcome = match deadline {
            Some(limit) => match tokio::time::timeout(limit, request).await {
                Ok(outcome) => outcome,
                Err(_) => Err(CatalogError::Cancelled(url.clone())),
            },
            None => request.await,
        };

        if let Err(e) = &outcome {
            log::warn!("Request to {} failed: {}", url, e);
        }
        outcome
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>> {
        log::info!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .send()
            .await?;

        let status = response.status();
        log::debug!("Response status for {}: {}", url, status);

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(CatalogError::Status {
                status,
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let body = body.trim();
        if body.is_empty() || body == "null" {
            log::debug!("Empty body from {}", url);
            return Ok(None);
        }

        Ok(Some(serde_json::from_str::<T>(body)?))
    }

    /// `pokemon/{name}`
    pub async fn pokemon(&self, name: &str) -> Result<Pokemon> {
        let path = format!("pokemon/{}", urlencoding::encode(name));
        self.fetch_optional(&path)
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("Pokémon {} not found!", name)))
    }

    /// `type/{type}`
    pub async fn type_detail(&self, type_name: &str) -> Result<TypeDetail> {
        let path = format!("type/{}", urlencoding::encode(type_name));
        self.fetch_optional(&path)
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("No Pokémon found for {}!", type_name)))
    }

    /// `type`, the full type catalog
    pub async fn type_listing(&self) -> Result<TypeListing> {
        self.fetch_optional("type")
            .await?
            .ok_or_else(|| CatalogError::NotFound("No Pokémon types found!".to_string()))
    }

    pub async fn species(&self, url: &str) -> Result<Species> {
        self.fetch_optional(url)
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("Species data not found: {}", url)))
    }

    pub async fn evolution_chain(&self, url: &str) -> Result<EvolutionChain> {
        self.fetch_optional(url)
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("Evolution chain not found: {}", url)))
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
