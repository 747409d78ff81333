use crate::pokeapi::PokeApi;
use crate::policy::FailurePolicy;
use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use pokeagg_core::pokeapi::Pokemon;
use pokeagg_core::stats::{group_by_type, TypeGroups};
use serde::{Deserialize, Serialize};

use super::format_json;

pub const POLICY: FailurePolicy = FailurePolicy::SuppressToEmpty;

/// Learners past this many are never fetched
pub const LEARNER_CAP: usize = 30;

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct LearnersOptions {
    /// Move name (e.g., "thunderbolt")
    #[clap(env = "POKEAGG_MOVE")]
    pub move_name: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: LearnersOptions, global: crate::Global) -> Result<()> {
    let api = super::create_api(&global)?;

    if global.verbose {
        eprintln!(
            "Grouping the first {} learners of {} by type",
            LEARNER_CAP, options.move_name
        );
    }

    let groups = learners_by_type_data(&api, &options.move_name).await?;

    if options.json {
        println!("{}", format_json(&groups)?);
    } else {
        println!("{}", format_groups_text(&options.move_name, &groups));
    }

    Ok(())
}

/// Names of the pokemon that learn a move, grouped by each of their types
///
/// Only the first [`LEARNER_CAP`] learners are considered, fetched one at
/// a time. Any failed fetch is logged and yields an empty result.
pub async fn learners_by_type_data(
    api: &PokeApi,
    move_name: &str,
) -> Result<TypeGroups, FetchError> {
    POLICY.settle(
        "fetching Pokémon by move grouped by type",
        group(api, move_name).await,
    )
}

async fn group(api: &PokeApi, move_name: &str) -> Result<TypeGroups, FetchError> {
    let learned_by = api.move_by_name(move_name).await?.learned_by_pokemon;

    if learned_by.len() > LEARNER_CAP {
        log::debug!(
            "{move_name} is learned by {} pokemon, keeping the first {LEARNER_CAP}",
            learned_by.len()
        );
    }

    let mut learners: Vec<Pokemon> = Vec::with_capacity(learned_by.len().min(LEARNER_CAP));
    for entry in learned_by.iter().take(LEARNER_CAP) {
        learners.push(api.get(&entry.url).await?);
    }

    Ok(group_by_type(&learners))
}

fn format_groups_text(move_name: &str, groups: &TypeGroups) -> String {
    if groups.is_empty() {
        return format!("No pokemon learn {}", move_name.bright_white())
            .yellow()
            .to_string();
    }

    let mut result = String::new();
    for (kind, names) in groups {
        result.push_str(&format!(
            "{} ({})\n  {}\n",
            kind.bright_magenta().bold(),
            names.len(),
            names.join(", ").white()
        ));
    }
    result
}
