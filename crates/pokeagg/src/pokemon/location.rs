use crate::fanout::fan_out;
use crate::pokeapi::PokeApi;
use crate::policy::FailurePolicy;
use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use pokeagg_core::pokeapi::{LocationArea, Pokemon};
use pokeagg_core::stats::{best_by_stats, BestByStats};
use serde::{Deserialize, Serialize};

use super::format_json;

pub const POLICY: FailurePolicy = FailurePolicy::SuppressToEmpty;

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct LocationOptions {
    /// Location name (e.g., "viridian-forest")
    #[clap(env = "POKEAGG_LOCATION")]
    pub name: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: LocationOptions, global: crate::Global) -> Result<()> {
    let api = super::create_api(&global)?;

    if global.verbose {
        eprintln!("Looking for the best pokemon in: {}", options.name);
    }

    let best = best_pokemon_in_location_data(&api, &options.name).await?;

    if options.json {
        println!("{}", format_json(&best)?);
    } else {
        println!("{}", format_best_text(&options.name, &best));
    }

    Ok(())
}

/// Best encounterable pokemon per stat across every area of a location
///
/// Any failed fetch is logged and yields an empty result.
pub async fn best_pokemon_in_location_data(
    api: &PokeApi,
    name: &str,
) -> Result<BestByStats, FetchError> {
    POLICY.settle(
        "fetching best Pokémon in location",
        collect(api, name).await,
    )
}

async fn collect(api: &PokeApi, name: &str) -> Result<BestByStats, FetchError> {
    let location = api.location(name).await?;
    let areas: Vec<LocationArea> = fan_out(&location.areas, |area| api.get(&area.url)).await?;

    // Duplicates across areas are kept; they cannot change a strict maximum.
    let encounters = areas
        .iter()
        .flat_map(|area| area.pokemon_encounters.iter())
        .map(|encounter| encounter.pokemon.url.as_str());
    let pokemon: Vec<Pokemon> = fan_out(encounters, |url| api.get(url)).await?;

    log::debug!(
        "Compared {} encounters across {} areas of {}",
        pokemon.len(),
        areas.len(),
        name
    );

    Ok(best_by_stats(&pokemon))
}

fn format_best_text(location: &str, best: &BestByStats) -> String {
    if best.is_empty() {
        return format!("No pokemon found in {}", location.bright_white())
            .yellow()
            .to_string();
    }

    let mut result = format!("\n{}\n", location.to_uppercase().bright_cyan().bold());
    for (stat, leader) in best.leaders() {
        result.push_str(&format!(
            "  {:<18} {} ({})\n",
            stat.green(),
            leader.name.bright_white().bold(),
            leader.value.to_string().bright_yellow()
        ));
    }
    result
}
