use async_trait::async_trait;
use pokeagg_core::pokeapi::decode_slice;
use serde_json::Value;

use crate::error::FetchError;

/// Capability to GET one JSON resource by absolute URL
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Value, FetchError>;
}

/// [`Fetch`] over HTTP
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Value, FetchError> {
        log::debug!("GET {url}");

        let response = self.client.get(url).send().await.map_err(|e| {
            log::debug!("GET {url} failed: {e}");
            FetchError::network()
        })?;

        let status = response.status();
        if !status.is_success() {
            log::debug!("GET {url} returned {status}");
            return Err(FetchError::status(status.as_u16(), status.canonical_reason()));
        }

        let body = response.bytes().await.map_err(|e| {
            log::debug!("GET {url} body failed: {e}");
            FetchError::network()
        })?;

        // Evolution chains nest one level per stage; no depth cap.
        decode_slice(&body).map_err(|e| FetchError::malformed(url, e))
    }
}
