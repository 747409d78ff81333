use crate::prelude::*;
use pokeagg_core::pokeapi::{decode_value, Location, Move, Pokemon, PokemonPage};
use serde::de::DeserializeOwned;

pub mod fetch;

pub use fetch::{Fetch, HttpFetcher};

/// PokeAPI configuration from environment variables
#[derive(Debug, Clone)]
pub struct PokeApiConfig {
    pub base_url: String,
}

impl PokeApiConfig {
    /// Default PokeAPI v2 base URL
    pub const DEFAULT_BASE_URL: &'static str = "https://pokeapi.co/api/v2";

    /// Load configuration from environment variables
    /// Uses POKEAPI_BASE_URL with default fallback
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("POKEAPI_BASE_URL")
                .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string()),
        }
    }

    /// Apply CLI overrides to the configuration
    pub fn with_overrides(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url {
            self.base_url = url;
        }
        self
    }
}

/// Create the HTTP client used against PokeAPI
pub fn create_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("pokeagg/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")
}

/// Typed access to PokeAPI resources over any [`Fetch`]
pub struct PokeApi {
    fetcher: Box<dyn Fetch>,
    base_url: String,
}

impl PokeApi {
    pub fn new(fetcher: Box<dyn Fetch>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { fetcher, base_url }
    }

    pub fn from_config(config: &PokeApiConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(create_client()?);
        Ok(Self::new(Box::new(fetcher), config.base_url.clone()))
    }

    /// `{base}/{resource}/{key}` with `key` percent-encoded
    pub fn endpoint(&self, resource: &str, key: &str) -> String {
        format!(
            "{}/{resource}/{}",
            self.base_url,
            urlencoding::encode(key.trim())
        )
    }

    /// Fetch `url` and decode it into `T`
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let value = self.fetcher.fetch(url).await?;
        decode_value(value).map_err(|e| FetchError::malformed(url, e))
    }

    /// `GET /pokemon/{name or id}`
    pub async fn pokemon(&self, identifier: &str) -> Result<Pokemon, FetchError> {
        self.get(&self.endpoint("pokemon", identifier)).await
    }

    /// `GET /pokemon?limit={limit}`, the first page of the roster
    pub async fn pokemon_page(&self, limit: u32) -> Result<PokemonPage, FetchError> {
        self.get(&format!("{}/pokemon?limit={limit}", self.base_url))
            .await
    }

    /// `GET /location/{name}`
    pub async fn location(&self, name: &str) -> Result<Location, FetchError> {
        self.get(&self.endpoint("location", name)).await
    }

    /// `GET /move/{name}`
    pub async fn move_by_name(&self, name: &str) -> Result<Move, FetchError> {
        self.get(&self.endpoint("move", name)).await
    }
}
