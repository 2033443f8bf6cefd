//! [`DataProvider`] backed by the public PokeAPI v2 REST service.

use crate::errors::{DataError, DataResult};
use crate::provider::DataProvider;
use reqwest::StatusCode;
use schema::pokeapi::{LearnsetFilter, MoveResponse, PokemonResponse};
use schema::{MoveDetails, SpeciesStats};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Fetches species and moves over HTTP.
///
/// The provider owns a single-threaded tokio runtime and blocks on it for
/// each lookup, so it must not be called from inside another runtime.
#[derive(Debug)]
pub struct PokeApiProvider {
    client: reqwest::Client,
    runtime: Runtime,
    base_url: String,
    version_group: String,
    learn_method: String,
}

impl PokeApiProvider {
    pub fn new(base_url: &str, version_group: &str, learn_method: &str) -> DataResult<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| DataError::Network {
                url: base_url.to_string(),
                source,
            })?;
        Ok(Self {
            client,
            runtime,
            base_url: base_url.trim_end_matches('/').to_string(),
            version_group: version_group.to_string(),
            learn_method: learn_method.to_string(),
        })
    }

    pub fn species_url(&self, name: &str) -> String {
        format!("{}/pokemon/{}", self.base_url, name.trim().to_lowercase())
    }

    /// Learnset entries carry the full resource URL; bare names are resolved
    /// against the base URL.
    pub fn move_url(&self, move_ref: &str) -> String {
        if move_ref.starts_with("http://") || move_ref.starts_with("https://") {
            move_ref.to_string()
        } else {
            format!("{}/move/{}", self.base_url, move_ref.trim().to_lowercase())
        }
    }

    fn filter(&self) -> LearnsetFilter<'_> {
        LearnsetFilter {
            version_group: &self.version_group,
            learn_method: &self.learn_method,
        }
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> DataResult<Option<T>> {
        self.runtime.block_on(fetch_json(&self.client, url))
    }
}

/// `Ok(None)` when the service answers 404.
async fn fetch_json<T: DeserializeOwned>(client: &reqwest::Client, url: &str) -> DataResult<Option<T>> {
    tracing::debug!(url, "GET");
    let network = |source: reqwest::Error| DataError::Network {
        url: url.to_string(),
        source,
    };

    let response = client.get(url).send().await.map_err(network)?;
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    if !status.is_success() {
        return Err(DataError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    let body = response.bytes().await.map_err(network)?;
    let record = serde_json::from_slice(&body).map_err(|source| DataError::Decode {
        url: url.to_string(),
        source,
    })?;
    Ok(Some(record))
}

impl DataProvider for PokeApiProvider {
    fn fetch_species(&self, name: &str) -> DataResult<SpeciesStats> {
        let url = self.species_url(name);
        let response: PokemonResponse = self
            .get_json(&url)?
            .ok_or_else(|| DataError::species_not_found(name))?;
        Ok(response.into_species_stats(self.filter())?)
    }

    fn fetch_move(&self, move_ref: &str) -> DataResult<MoveDetails> {
        let url = self.move_url(move_ref);
        let response: MoveResponse = self
            .get_json(&url)?
            .ok_or_else(|| DataError::move_not_found(move_ref))?;
        Ok(response.into_move_details()?)
    }
}
