use crate::pokeapi::{PokeApi, PokeApiConfig};
use crate::prelude::{eprintln, *};
use serde::Serialize;

pub mod detail;
pub mod evolution;
pub mod learners;
pub mod location;
pub mod ranking;

/// Build the API handle for a CLI run
pub fn create_api(global: &crate::Global) -> Result<PokeApi> {
    let config = PokeApiConfig::from_env().with_overrides(global.base_url.clone());

    if global.verbose {
        eprintln!("PokeAPI Base: {}", config.base_url);
    }

    PokeApi::from_config(&config)
}

/// Pretty-printed JSON for any of the aggregated views
pub fn format_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| eyre!("JSON serialization failed: {}", e))
}
