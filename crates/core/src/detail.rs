//! Denormalized pokemon record
//!
//! The shell fetches the pokemon, its species, every ability, every move
//! and the evolution chain; these functions reshape those responses into a
//! single [`DetailedPokemon`].

use serde::Serialize;

use crate::evolution::{flatten_first_path, EvolutionNode, EvolutionStage};
use crate::pokeapi::{Ability, EvolutionChain, Move, Pokemon, Species};

pub const EFFECT_LANGUAGE: &str = "en";

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct AbilityOutput {
    pub name: String,
    pub effect: String,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct BaseStatOutput {
    pub name: String,
    pub base_stat: u32,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct MoveOutput {
    pub name: String,
    pub power: Option<u32>,
    pub accuracy: Option<u32>,
    #[serde(rename = "type")]
    pub move_type: String,
    pub damage_class: String,
}

#[derive(Debug, Serialize, Clone, Default, PartialEq, Eq)]
pub struct DetailedPokemon {
    pub name: String,
    pub id: u32,
    pub height: u32,
    pub weight: u32,
    pub species: String,
    pub abilities: Vec<AbilityOutput>,
    pub types: Vec<String>,
    pub base_stats: Vec<BaseStatOutput>,
    pub moves: Vec<MoveOutput>,
    pub evolution_chain: Vec<EvolutionStage>,
}

/// Effect text in [`EFFECT_LANGUAGE`]
///
/// Falls back to the first entry in any language when there is no English
/// one. Returns `None` only when the ability has no effect entries at all.
pub fn english_effect(ability: &Ability) -> Option<&str> {
    ability
        .effect_entries
        .iter()
        .find(|entry| entry.language.name == EFFECT_LANGUAGE)
        .or_else(|| ability.effect_entries.first())
        .map(|entry| entry.effect.as_str())
}

pub fn transform_ability(ability: Ability) -> AbilityOutput {
    let effect = english_effect(&ability).unwrap_or_default().to_string();
    AbilityOutput {
        name: ability.name,
        effect,
    }
}

pub fn transform_move(move_data: Move) -> MoveOutput {
    MoveOutput {
        name: move_data.name,
        power: move_data.power,
        accuracy: move_data.accuracy,
        move_type: move_data.move_type.name,
        damage_class: move_data.damage_class.name,
    }
}

pub fn transform_base_stats(pokemon: &Pokemon) -> Vec<BaseStatOutput> {
    pokemon
        .stats
        .iter()
        .map(|s| BaseStatOutput {
            name: s.stat.name.clone(),
            base_stat: s.base_stat,
        })
        .collect()
}

/// Compose the final record
///
/// `abilities` and `moves` must already be in the order the pokemon lists
/// them; they are copied through as-is.
pub fn build_detailed_pokemon(
    pokemon: Pokemon,
    species: Species,
    abilities: Vec<AbilityOutput>,
    moves: Vec<MoveOutput>,
    chain: &EvolutionChain,
) -> DetailedPokemon {
    let evolution_chain = flatten_first_path(&EvolutionNode::from_chain(&chain.chain));
    let types = pokemon.type_names();
    let base_stats = transform_base_stats(&pokemon);

    DetailedPokemon {
        name: pokemon.name,
        id: pokemon.id,
        height: pokemon.height,
        weight: pokemon.weight,
        species: species.name,
        abilities,
        types,
        base_stats,
        moves,
        evolution_chain,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn blaze() -> Ability {
        serde_json::from_value(json!({
            "name": "blaze",
            "effect_entries": [
                { "effect": "Bei Gefahr werden Feuer-Attacken stärker.", "language": { "name": "de" } },
                { "effect": "Powers up Fire-type moves when the Pokémon is in trouble.", "language": { "name": "en" } }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_english_effect_selects_en_entry() {
        assert_eq!(
            english_effect(&blaze()),
            Some("Powers up Fire-type moves when the Pokémon is in trouble.")
        );
    }

    #[test]
    fn test_english_effect_falls_back_to_first_entry() {
        let ability: Ability = serde_json::from_value(json!({
            "name": "blaze",
            "effect_entries": [{ "effect": "Feuer.", "language": { "name": "de" } }]
        }))
        .unwrap();
        assert_eq!(english_effect(&ability), Some("Feuer."));
    }

    #[test]
    fn test_transform_ability_without_entries() {
        let ability: Ability = serde_json::from_value(json!({ "name": "mystery" })).unwrap();
        assert_eq!(english_effect(&ability), None);
        assert_eq!(
            transform_ability(ability),
            AbilityOutput {
                name: "mystery".to_string(),
                effect: String::new()
            }
        );
    }

    #[test]
    fn test_transform_move() {
        let ember: Move = serde_json::from_value(json!({
            "name": "ember",
            "power": 40,
            "accuracy": 100,
            "type": { "name": "fire" },
            "damage_class": { "name": "special" }
        }))
        .unwrap();

        assert_eq!(
            serde_json::to_value(transform_move(ember)).unwrap(),
            json!({
                "name": "ember",
                "power": 40,
                "accuracy": 100,
                "type": "fire",
                "damage_class": "special"
            })
        );
    }

    #[test]
    fn test_transform_move_null_power() {
        let growl: Move = serde_json::from_value(json!({
            "name": "growl",
            "power": null,
            "accuracy": 100,
            "type": { "name": "normal" },
            "damage_class": { "name": "status" }
        }))
        .unwrap();

        let output = serde_json::to_value(transform_move(growl)).unwrap();
        assert_eq!(output["power"], json!(null));
        assert_eq!(output["accuracy"], json!(100));
    }

    #[test]
    fn test_build_detailed_pokemon() {
        let pokemon: Pokemon = serde_json::from_value(json!({
            "name": "charmander",
            "id": 4,
            "height": 6,
            "weight": 85,
            "species": { "url": "https://pokeapi.co/api/v2/pokemon-species/4/" },
            "abilities": [{ "ability": { "url": "https://pokeapi.co/api/v2/ability/65/" } }],
            "types": [{ "type": { "name": "fire" } }],
            "stats": [{ "base_stat": 39, "stat": { "name": "hp" } }],
            "moves": [{ "move": { "url": "https://pokeapi.co/api/v2/move/52/" } }]
        }))
        .unwrap();
        let species: Species = serde_json::from_value(json!({
            "name": "charmander",
            "evolution_chain": { "url": "https://pokeapi.co/api/v2/evolution-chain/2/" }
        }))
        .unwrap();
        let chain: EvolutionChain = serde_json::from_value(json!({
            "chain": {
                "species": { "name": "charmander" },
                "evolves_to": [{
                    "species": { "name": "charmeleon" },
                    "evolution_details": [{ "min_level": 16 }],
                    "evolves_to": []
                }]
            }
        }))
        .unwrap();

        let record = build_detailed_pokemon(
            pokemon,
            species,
            vec![transform_ability(blaze())],
            vec![],
            &chain,
        );

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
                "moves": [],
                "evolution_chain": [
                    { "species_name": "charmander", "min_level": null },
                    { "species_name": "charmeleon", "min_level": 16 }
                ]
            })
        );
    }
}
