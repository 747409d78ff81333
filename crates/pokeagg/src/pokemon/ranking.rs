use crate::fanout::fan_out;
use crate::pokeapi::PokeApi;
use crate::policy::FailurePolicy;
use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use pokeagg_core::pokeapi::Pokemon;
use pokeagg_core::stats::{rank_by_stat, RankedPokemon};
use serde::{Deserialize, Serialize};

use super::format_json;

pub const POLICY: FailurePolicy = FailurePolicy::Propagate;

/// Upper bound of the roster page the ranking is computed over
pub const ROSTER_LIMIT: u32 = 1000;

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct RankOptions {
    /// Stat to rank by: hp, attack, defense, special-attack, special-defense, speed
    #[arg(value_name = "STAT")]
    pub stat: String,

    /// Number of pokemon to return
    #[arg(short, long, env = "POKEAGG_TOP", default_value = "10")]
    pub top: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: RankOptions, global: crate::Global) -> Result<()> {
    let api = super::create_api(&global)?;

    if global.verbose {
        eprintln!(
            "Ranking up to {} pokemon by {} (top {})",
            ROSTER_LIMIT, options.stat, options.top
        );
    }

    let ranking = top_pokemon_by_stat_data(&api, &options.stat, options.top).await?;

    if options.json {
        println!("{}", format_json(&ranking)?);
    } else {
        output_table(&ranking, &options.stat);
    }

    Ok(())
}

/// Fetch the roster, every pokemon on it, and keep the `top_n` best by `stat`
///
/// Failures are returned to the caller.
pub async fn top_pokemon_by_stat_data(
    api: &PokeApi,
    stat: &str,
    top_n: usize,
) -> Result<Vec<RankedPokemon>, FetchError> {
    POLICY.settle(
        "ranking Pokémon by stat",
        rank(api, stat, top_n).await,
    )
}

async fn rank(api: &PokeApi, stat: &str, top_n: usize) -> Result<Vec<RankedPokemon>, FetchError> {
    let roster = api.pokemon_page(ROSTER_LIMIT).await?;
    let pokemon: Vec<Pokemon> = fan_out(&roster.results, |entry| api.get(&entry.url)).await?;

    Ok(rank_by_stat(&pokemon, stat, top_n))
}

fn output_table(ranking: &[RankedPokemon], stat: &str) {
    if ranking.is_empty() {
        println!("{}", format!("No pokemon report the '{stat}' stat.").yellow());
        return;
    }

    let mut table = new_table();
    table.add_row(prettytable::row!["#", "Name", stat]);
    for (idx, entry) in ranking.iter().enumerate() {
        table.add_row(prettytable::row![idx + 1, entry.name, entry.stat_value]);
    }
    table.printstd();
}
