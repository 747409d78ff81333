use crate::pokeapi::PokeApi;
use crate::policy::FailurePolicy;
use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use pokeagg_core::evolution::{walk_all_branches, EvolutionNode, EvolutionStep, Requirement};
use pokeagg_core::pokeapi::{EvolutionChain, Species};
use serde::{Deserialize, Serialize};

use super::format_json;

pub const POLICY: FailurePolicy = FailurePolicy::SuppressToEmpty;

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct EvolutionOptions {
    /// Pokemon name (e.g., "eevee")
    #[clap(env = "POKEAGG_POKEMON")]
    pub pokemon: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: EvolutionOptions, global: crate::Global) -> Result<()> {
    let api = super::create_api(&global)?;

    if global.verbose {
        eprintln!("Walking the evolution chain of: {}", options.pokemon);
    }

    let steps = evolution_details_data(&api, &options.pokemon).await?;

    if options.json {
        println!("{}", format_json(&steps)?);
    } else {
        println!("{}", format_steps_text(&options.pokemon, &steps));
    }

    Ok(())
}

/// Every species of a pokemon's evolution family with the way it is reached
///
/// Any failed fetch is logged and yields an empty list.
pub async fn evolution_details_data(
    api: &PokeApi,
    pokemon: &str,
) -> Result<Vec<EvolutionStep>, FetchError> {
    POLICY.settle(
        "fetching evolution details",
        walk(api, pokemon).await,
    )
}

async fn walk(api: &PokeApi, name: &str) -> Result<Vec<EvolutionStep>, FetchError> {
    let pokemon = api.pokemon(name).await?;
    let species: Species = api.get(&pokemon.species.url).await?;
    let chain: EvolutionChain = api.get(&species.evolution_chain.url).await?;

    let tree = EvolutionNode::from_chain(&chain.chain);
    log::debug!("Evolution chain {} has {} species", chain.id, tree.size());

    Ok(walk_all_branches(&tree))
}

fn format_requirement(requirement: &Requirement) -> String {
    match requirement {
        Requirement::Level {
            min_level: Some(level),
        } => format!("level {level}"),
        Requirement::Level { min_level: None } => "level up".to_string(),
        Requirement::Item { item: Some(item) } => format!("use {item}"),
        Requirement::Item { item: None } => "use an item".to_string(),
        Requirement::Conditions(conditions) => serde_json::to_value(conditions)
            .ok()
            .and_then(|value| value.as_object().cloned())
            .map(|fields| {
                fields
                    .iter()
                    .map(|(key, value)| match value.as_str() {
                        Some(text) => format!("{key}={text}"),
                        None => format!("{key}={value}"),
                    })
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default(),
    }
}

fn format_steps_text(pokemon: &str, steps: &[EvolutionStep]) -> String {
    if steps.is_empty() {
        return format!("No evolution data for {}", pokemon.bright_white())
            .yellow()
            .to_string();
    }

    let mut result = String::new();
    for step in steps {
        match step {
            EvolutionStep::Base { species_name } => {
                result.push_str(&format!("{}\n", species_name.bright_cyan().bold()));
            }
            EvolutionStep::Evolution {
                evolve_to,
                trigger,
                requirement,
            } => {
                let how = requirement
                    .as_ref()
                    .map(format_requirement)
                    .filter(|text| !text.is_empty())
                    .or_else(|| trigger.clone())
                    .unwrap_or_else(|| "unknown".to_string());
                result.push_str(&format!(
                    "  -> {} ({})\n",
                    evolve_to.bright_white(),
                    how.green()
                ));
            }
        }
    }
    result
}
