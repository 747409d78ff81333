//! PokeAPI v2 response models
//!
//! Only the fields the aggregations read are modeled. Every struct is
//! `#[serde(default)]` so partial payloads (and trimmed fixtures) decode
//! without complaint; a missing field simply shows up as its default.
//!
//! Evolution chains nest one object per stage, so responses are decoded
//! with [`decode_slice`] and [`decode_value`], which lift serde_json's
//! recursion limit and grow the stack on demand.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `{name, url}` pair PokeAPI uses for every cross-resource reference
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

/// Reference that only carries a URL (e.g. `species.evolution_chain`)
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ApiResource {
    pub url: String,
}

/// `GET /pokemon/{id or name}`
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    pub species: NamedResource,
    pub abilities: Vec<PokemonAbility>,
    pub types: Vec<PokemonType>,
    pub stats: Vec<PokemonStat>,
    pub moves: Vec<PokemonMove>,
}

impl Pokemon {
    /// Base value of the named stat, if the record reports it
    pub fn stat(&self, name: &str) -> Option<u32> {
        self.stats
            .iter()
            .find(|s| s.stat.name == name)
            .map(|s| s.base_stat)
    }

    /// Type names in slot order
    pub fn type_names(&self) -> Vec<String> {
        self.types.iter().map(|t| t.kind.name.clone()).collect()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct PokemonAbility {
    pub ability: NamedResource,
    pub is_hidden: bool,
    pub slot: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct PokemonType {
    pub slot: u32,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct PokemonStat {
    pub base_stat: u32,
    pub effort: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct PokemonMove {
    #[serde(rename = "move")]
    pub move_ref: NamedResource,
}

/// `GET /pokemon?limit=N`
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct PokemonPage {
    pub count: u32,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<NamedResource>,
}

/// `GET /pokemon-species/{id}`
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct Species {
    pub id: u32,
    pub name: String,
    pub evolution_chain: ApiResource,
}

/// `GET /ability/{id}`
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct Ability {
    pub id: u32,
    pub name: String,
    pub effect_entries: Vec<EffectEntry>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct EffectEntry {
    pub effect: String,
    pub short_effect: String,
    pub language: NamedResource,
}

/// `GET /move/{id or name}`
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct Move {
    pub id: u32,
    pub name: String,
    pub power: Option<u32>,
    pub accuracy: Option<u32>,
    #[serde(rename = "type")]
    pub move_type: NamedResource,
    pub damage_class: NamedResource,
    pub learned_by_pokemon: Vec<NamedResource>,
}

/// `GET /evolution-chain/{id}`
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct EvolutionChain {
    pub id: u32,
    pub chain: ChainLink,
}

/// One node of the upstream chain, with the details of the edge leading into it
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct ChainLink {
    pub is_baby: bool,
    pub species: NamedResource,
    pub evolution_details: Vec<EvolutionDetail>,
    pub evolves_to: Vec<ChainLink>,
}

/// Conditions attached to an evolution edge
///
/// PokeAPI sends every key on every entry and nulls the ones that do not
/// apply; `time_of_day` uses the empty string instead of null.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct EvolutionDetail {
    pub trigger: Option<NamedResource>,
    pub min_level: Option<u32>,
    pub item: Option<NamedResource>,
    pub held_item: Option<NamedResource>,
    pub min_happiness: Option<u32>,
    pub min_affection: Option<u32>,
    pub min_beauty: Option<u32>,
    pub time_of_day: String,
    pub known_move: Option<NamedResource>,
    pub known_move_type: Option<NamedResource>,
    pub location: Option<NamedResource>,
    pub gender: Option<u8>,
    pub party_species: Option<NamedResource>,
    pub party_type: Option<NamedResource>,
    pub relative_physical_stats: Option<i8>,
    pub trade_species: Option<NamedResource>,
    pub needs_overworld_rain: bool,
    pub turn_upside_down: bool,
}

/// `GET /location/{name}`
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct Location {
    pub id: u32,
    pub name: String,
    pub areas: Vec<NamedResource>,
}

/// `GET /location-area/{id}`
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct LocationArea {
    pub id: u32,
    pub name: String,
    pub pokemon_encounters: Vec<PokemonEncounter>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct PokemonEncounter {
    pub pokemon: NamedResource,
}

/// Decode JSON text into `T` with no nesting limit
pub fn decode_slice<T: DeserializeOwned>(bytes: &[u8]) -> serde_json::Result<T> {
    let mut de = serde_json::Deserializer::from_slice(bytes);
    de.disable_recursion_limit();
    let value = T::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(value)
}

/// Decode an already parsed [`Value`] into `T` with no nesting limit
pub fn decode_value<T: DeserializeOwned>(value: Value) -> serde_json::Result<T> {
    T::deserialize(serde_stacker::Deserializer::new(value))
}
