//! Stat-based selections over fetched pokemon
//!
//! Pure functions behind the ranking, best-in-location and learners-by-type
//! aggregations. Inputs arrive in fetch order and that order is what breaks
//! ties.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::pokeapi::Pokemon;

/// Stats compared by the best-in-location view, in output order
pub const LOCATION_STATS: [&str; 5] = [
    "attack",
    "defense",
    "special-attack",
    "special-defense",
    "speed",
];

/// Entry of a top-N ranking
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct RankedPokemon {
    pub name: String,
    #[serde(rename = "statValue")]
    pub stat_value: u32,
}

/// Holder of the highest value for one stat
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct StatLeader {
    pub name: String,
    pub value: u32,
}

/// Best pokemon per stat; serializes to `{}` when nothing was compared
#[derive(Debug, Serialize, Clone, Default, PartialEq, Eq)]
pub struct BestByStats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attack: Option<StatLeader>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defense: Option<StatLeader>,
    #[serde(rename = "special-attack", skip_serializing_if = "Option::is_none")]
    pub special_attack: Option<StatLeader>,
    #[serde(rename = "special-defense", skip_serializing_if = "Option::is_none")]
    pub special_defense: Option<StatLeader>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<StatLeader>,
}

impl BestByStats {
    pub fn is_empty(&self) -> bool {
        self.leaders().next().is_none()
    }

    /// `(stat, leader)` pairs that are set, in [`LOCATION_STATS`] order
    pub fn leaders(&self) -> impl Iterator<Item = (&'static str, &StatLeader)> {
        [
            &self.attack,
            &self.defense,
            &self.special_attack,
            &self.special_defense,
            &self.speed,
        ]
        .into_iter()
        .zip(LOCATION_STATS)
        .filter_map(|(leader, stat)| leader.as_ref().map(|l| (stat, l)))
    }
}

/// Pokemon names grouped by type name
pub type TypeGroups = BTreeMap<String, Vec<String>>;

/// Sort by the given stat, highest first, and keep the first `top_n`
///
/// The sort is stable, so equal values keep their roster order. Pokemon
/// that do not report the stat are left out.
pub fn rank_by_stat(pokemon: &[Pokemon], stat: &str, top_n: usize) -> Vec<RankedPokemon> {
    let mut ranked: Vec<RankedPokemon> = pokemon
        .iter()
        .filter_map(|p| {
            p.stat(stat).map(|value| RankedPokemon {
                name: p.name.clone(),
                stat_value: value,
            })
        })
        .collect();

    ranked.sort_by_key(|r| Reverse(r.stat_value));
    ranked.truncate(top_n);
    ranked
}

/// First pokemon holding the maximum value of `stat`
pub fn stat_leader(pokemon: &[Pokemon], stat: &str) -> Option<StatLeader> {
    let mut leader: Option<StatLeader> = None;

    for p in pokemon {
        let Some(value) = p.stat(stat) else {
            continue;
        };
        if leader.as_ref().is_none_or(|best| value > best.value) {
            leader = Some(StatLeader {
                name: p.name.clone(),
                value,
            });
        }
    }

    leader
}

/// Pick the leader of each of the [`LOCATION_STATS`] independently
pub fn best_by_stats(pokemon: &[Pokemon]) -> BestByStats {
    BestByStats {
        attack: stat_leader(pokemon, "attack"),
        defense: stat_leader(pokemon, "defense"),
        special_attack: stat_leader(pokemon, "special-attack"),
        special_defense: stat_leader(pokemon, "special-defense"),
        speed: stat_leader(pokemon, "speed"),
    }
}

/// Append each pokemon's name to the group of every type it has
pub fn group_by_type<'a>(pokemon: impl IntoIterator<Item = &'a Pokemon>) -> TypeGroups {
    let mut groups = TypeGroups::new();
    for p in pokemon {
        for type_name in p.type_names() {
            groups.entry(type_name).or_default().push(p.name.clone());
        }
    }
    groups
}
