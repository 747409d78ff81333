use crate::fanout::fan_out;
use crate::pokeapi::PokeApi;
use crate::policy::FailurePolicy;
use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use pokeagg_core::detail::{
    build_detailed_pokemon, english_effect, transform_ability, transform_move, AbilityOutput,
    DetailedPokemon, MoveOutput, EFFECT_LANGUAGE,
};
use pokeagg_core::pokeapi::{Ability, EvolutionChain, Move, Species};
use serde::{Deserialize, Serialize};

use super::format_json;

pub const POLICY: FailurePolicy = FailurePolicy::Propagate;

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct DetailOptions {
    /// Pokemon name or Pokédex number (e.g., "charmander" or "4")
    #[clap(env = "POKEAGG_POKEMON")]
    pub identifier: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: DetailOptions, global: crate::Global) -> Result<()> {
    let api = super::create_api(&global)?;

    if global.verbose {
        eprintln!("Fetching detailed data for: {}", options.identifier);
    }

    let record = detailed_pokemon_data(&api, &options.identifier).await?;

    if options.json {
        println!("{}", format_json(&record)?);
    } else {
        println!("{}", format_detail_text(&record));
    }

    Ok(())
}

/// Fetch a pokemon with its species, abilities, moves and evolution line
///
/// Any failed fetch aborts the whole record and is returned to the caller.
pub async fn detailed_pokemon_data(
    api: &PokeApi,
    identifier: &str,
) -> Result<DetailedPokemon, FetchError> {
    POLICY.settle(
        "fetching detailed Pokémon data",
        assemble(api, identifier).await,
    )
}

async fn assemble(api: &PokeApi, identifier: &str) -> Result<DetailedPokemon, FetchError> {
    let pokemon = api.pokemon(identifier).await?;
    let species: Species = api.get(&pokemon.species.url).await?;

    let abilities = fan_out(&pokemon.abilities, |entry| fetch_ability(api, &entry.ability.url));
    let moves = fan_out(&pokemon.moves, |entry| fetch_move(api, &entry.move_ref.url));
    let chain = api.get::<EvolutionChain>(&species.evolution_chain.url);

    let (abilities, moves, chain) = futures::try_join!(abilities, moves, chain)?;

    Ok(build_detailed_pokemon(
        pokemon, species, abilities, moves, &chain,
    ))
}

async fn fetch_ability(api: &PokeApi, url: &str) -> Result<AbilityOutput, FetchError> {
    let ability: Ability = api.get(url).await?;

    if !ability
        .effect_entries
        .iter()
        .any(|entry| entry.language.name == EFFECT_LANGUAGE)
    {
        log::warn!(
            "Ability {} has no '{EFFECT_LANGUAGE}' effect entry, using {:?}",
            ability.name,
            english_effect(&ability).unwrap_or_default()
        );
    }

    Ok(transform_ability(ability))
}

async fn fetch_move(api: &PokeApi, url: &str) -> Result<MoveOutput, FetchError> {
    api.get::<Move>(url).await.map(transform_move)
}

fn format_optional(value: Option<u32>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Build formatted text output for a detailed record
fn format_detail_text(record: &DetailedPokemon) -> String {
    let mut result = String::new();

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!(
        "{} {}\n",
        format!("#{}", record.id).bright_cyan().bold(),
        record.name.to_uppercase().white().bold()
    ));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_cyan()));

    result.push_str(&format!(
        "{}: {}\n",
        "Species".green(),
        record.species.bright_white()
    ));
    result.push_str(&format!(
        "{}: {}\n",
        "Types".green(),
        record.types.join(", ").bright_magenta()
    ));
    result.push_str(&format!(
        "{}: {} | {}: {}\n",
        "Height".green(),
        record.height.to_string().bright_white(),
        "Weight".green(),
        record.weight.to_string().bright_white()
    ));

    result.push_str(&format!("\n{}\n", "BASE STATS".bright_yellow().bold()));
    for stat in &record.base_stats {
        result.push_str(&format!(
            "  {:<18} {}\n",
            stat.name.green(),
            stat.base_stat.to_string().bright_yellow()
        ));
    }

    result.push_str(&format!("\n{}\n", "ABILITIES".bright_yellow().bold()));
    for ability in &record.abilities {
        result.push_str(&format!(
            "  {}: {}\n",
            ability.name.bright_white().bold(),
            ability.effect.white()
        ));
    }

    result.push_str(&format!(
        "\n{} ({})\n",
        "MOVES".bright_yellow().bold(),
        record.moves.len()
    ));
    for m in &record.moves {
        result.push_str(&format!(
            "  {:<20} {} | {}: {} | {}: {} | {}\n",
            m.name.bright_white(),
            m.move_type.bright_magenta(),
            "Power".green(),
            format_optional(m.power),
            "Accuracy".green(),
            format_optional(m.accuracy),
            m.damage_class.bright_black()
        ));
    }

    result.push_str(&format!("\n{}\n", "EVOLUTION".bright_yellow().bold()));
    let stages: Vec<String> = record
        .evolution_chain
        .iter()
        .map(|stage| match stage.min_level {
            Some(level) => format!("{} (Lv. {level})", stage.species_name),
            None => stage.species_name.clone(),
        })
        .collect();
    result.push_str(&format!("  {}\n", stages.join(" -> ").cyan()));

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeFetcher;
    use serde_json::{json, Value};

    const CHARMANDER: &str = "https://pokeapi.co/api/v2/pokemon/charmander";
    const SPECIES: &str = "https://pokeapi.co/api/v2/pokemon-species/4/";
    const BLAZE: &str = "https://pokeapi.co/api/v2/ability/65/";
    const EMBER: &str = "https://pokeapi.co/api/v2/move/52/";
    const CHAIN: &str = "https://pokeapi.co/api/v2/evolution-chain/2/";

    fn charmander(moves: &[&str]) -> Value {
        let moves: Vec<Value> = moves
            .iter()
            .map(|url| json!({ "move": { "url": url } }))
            .collect();
        json!({
            "name": "charmander",
            "id": 4,
            "height": 6,
            "weight": 85,
            "species": { "url": SPECIES },
            "abilities": [{ "ability": { "url": BLAZE } }],
            "types": [{ "type": { "name": "fire" } }],
            "stats": [{ "base_stat": 39, "stat": { "name": "hp" } }],
            "moves": moves
        })
    }

    fn ember() -> Value {
        json!({
            "name": "ember",
            "power": 40,
            "accuracy": 100,
            "type": { "name": "fire" },
            "damage_class": { "name": "special" }
        })
    }

    fn charmander_fetcher(moves: &[&str]) -> FakeFetcher {
        FakeFetcher::new()
            .with(CHARMANDER, charmander(moves))
            .with(
                SPECIES,
                json!({ "name": "charmander", "evolution_chain": { "url": CHAIN } }),
            )
            .with(
                BLAZE,
                json!({
                    "name": "blaze",
                    "effect_entries": [{
                        "effect": "Powers up Fire-type moves when the Pokémon is in trouble.",
                        "language": { "name": "en" }
                    }]
                }),
            )
            .with(EMBER, ember())
            .with(
                CHAIN,
                json!({
                    "chain": {
                        "species": { "name": "charmander" },
                        "evolves_to": [{
                            "species": { "name": "charmeleon" },
                            "evolution_details": [{ "min_level": 16 }],
                            "evolves_to": [{
                                "species": { "name": "charizard" },
                                "evolution_details": [{ "min_level": 36 }],
                                "evolves_to": []
                            }]
                        }]
                    }
                }),
            )
    }

    #[tokio::test]
    async fn test_detailed_pokemon_data() {
        let api = charmander_fetcher(&[EMBER]).into_api();

        let record = detailed_pokemon_data(&api, "charmander").await.unwrap();

        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "name": "charmander",
                "id": 4,
                "height": 6,
                "weight": 85,
                "species": "charmander",
                "abilities": [{
                    "name": "blaze",
                    "effect": "Powers up Fire-type moves when the Pokémon is in trouble."
                }],
                "types": ["fire"],
                "base_stats": [{ "name": "hp", "base_stat": 39 }],
                "moves": [{
                    "name": "ember",
                    "power": 40,
                    "accuracy": 100,
                    "type": "fire",
                    "damage_class": "special"
                }],
                "evolution_chain": [
                    { "species_name": "charmander", "min_level": null },
                    { "species_name": "charmeleon", "min_level": 16 },
                    { "species_name": "charizard", "min_level": 36 }
                ]
            })
        );
    }

    #[tokio::test]
    async fn test_moves_keep_length_and_order() {
        const SCRATCH: &str = "https://pokeapi.co/api/v2/move/10/";
        const GROWL: &str = "https://pokeapi.co/api/v2/move/45/";

        // The first move answers last.
        let api = charmander_fetcher(&[SCRATCH, EMBER, GROWL])
            .with_delay(
                SCRATCH,
                json!({ "name": "scratch", "power": 40, "accuracy": 100 }),
                40,
            )
            .with(GROWL, json!({ "name": "growl", "power": null, "accuracy": 100 }))
            .into_api();

        let record = detailed_pokemon_data(&api, "charmander").await.unwrap();

        let names: Vec<&str> = record.moves.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["scratch", "ember", "growl"]);
        assert_eq!(record.moves[2].power, None);
    }

    #[tokio::test]
    async fn test_species_fetched_after_pokemon() {
        let fetcher = charmander_fetcher(&[EMBER]);
        let probe = fetcher.probe();
        let api = fetcher.into_api();

        detailed_pokemon_data(&api, "charmander").await.unwrap();

        let requests = probe.requests();
        assert_eq!(requests[0], CHARMANDER);
        assert_eq!(requests[1], SPECIES);
        assert_eq!(requests.len(), 5);
    }

    #[tokio::test]
    async fn test_server_error_propagates_status_text() {
        let api = FakeFetcher::new()
            .with_status(CHARMANDER, 500, "Internal Server Error")
            .into_api();

        let err = detailed_pokemon_data(&api, "charmander")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Error fetching data: Internal Server Error");
    }

    #[tokio::test]
    async fn test_failure_in_fan_out_aborts_record() {
        let api = charmander_fetcher(&[EMBER])
            .with_network_error(EMBER)
            .into_api();

        let err = detailed_pokemon_data(&api, "charmander")
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("Error fetching data: "));
        assert_eq!(err.status, None);
    }

    #[tokio::test]
    async fn test_missing_evolution_chain_aborts_record() {
        let api = charmander_fetcher(&[EMBER])
            .with_status(CHAIN, 404, "Not Found")
            .into_api();

        let err = detailed_pokemon_data(&api, "charmander")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Error fetching data: Not Found");
    }

    #[tokio::test]
    async fn test_ability_without_english_entry_falls_back() {
        let api = charmander_fetcher(&[])
            .with(
                BLAZE,
                json!({
                    "name": "blaze",
                    "effect_entries": [{ "effect": "Feuer.", "language": { "name": "de" } }]
                }),
            )
            .into_api();

        let record = detailed_pokemon_data(&api, "charmander").await.unwrap();
        assert_eq!(record.abilities[0].effect, "Feuer.");
        assert!(record.moves.is_empty());
    }

    #[test]
    fn test_format_detail_text() {
        let record = DetailedPokemon {
            name: "charmander".to_string(),
            id: 4,
            species: "charmander".to_string(),
            types: vec!["fire".to_string()],
            moves: vec![transform_move(serde_json::from_value(ember()).unwrap())],
            ..Default::default()
        };

        let text = format_detail_text(&record);
        assert!(text.contains("CHARMANDER"));
        assert!(text.contains("ember"));
        assert!(text.contains("MOVES"));
    }
}
