//! Evolution chain tree and its two traversals
//!
//! PokeAPI encodes a chain as nested `evolves_to` links where the details of
//! an edge live on the child. [`EvolutionNode::from_chain`] lifts that into a
//! tree whose nodes own `(edge, child)` branches, with the edge trigger
//! decoded into a [`Trigger`] variant. Two walks run over it:
//!
//! - [`flatten_first_path`]: root first, follows only the first child at each
//!   level, always reports `min_level` (null when absent).
//! - [`walk_all_branches`]: pre-order over every branch, emitting the edge
//!   data of each non-root node with only the keys its trigger kind defines.
//!
//! Building the tree and both walks are iterative, so chain depth is not
//! limited by the call stack.

use serde::Serialize;

use crate::pokeapi::{ChainLink, EvolutionDetail, NamedResource};

pub const LEVEL_UP: &str = "level-up";
pub const USE_ITEM: &str = "use-item";

/// A species in the chain and the evolutions that leave it, in upstream order
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionNode {
    pub species: String,
    pub branches: Vec<Branch>,
}

/// Edge into `node` plus the node itself
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    /// `None` when upstream lists no evolution details for the edge
    pub edge: Option<EvolutionEdge>,
    pub node: EvolutionNode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionEdge {
    /// Minimum level as reported on the edge, whatever the trigger
    pub min_level: Option<u32>,
    pub trigger: Option<Trigger>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Trigger {
    LevelUp { min_level: Option<u32> },
    UseItem { item: Option<String> },
    Other {
        kind: String,
        conditions: EvolutionConditions,
    },
}

/// Upstream conditions that are set on an edge, keyed by their upstream names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EvolutionConditions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_level: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub held_item: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_happiness: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_affection: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_beauty: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub known_move: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub known_move_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party_species: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_physical_stats: Option<i8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade_species: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub needs_overworld_rain: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub turn_upside_down: bool,
}

/// One entry of the first-path walk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvolutionStage {
    pub species_name: String,
    pub min_level: Option<u32>,
}

/// One entry of the all-branches walk
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EvolutionStep {
    Base {
        #[serde(rename = "speciesName")]
        species_name: String,
    },
    Evolution {
        evolve_to: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        trigger: Option<String>,
        #[serde(flatten)]
        requirement: Option<Requirement>,
    },
}

/// Trigger-specific keys of an [`EvolutionStep::Evolution`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Requirement {
    Level {
        #[serde(rename = "minLevel")]
        min_level: Option<u32>,
    },
    Item {
        item: Option<String>,
    },
    Conditions(EvolutionConditions),
}

fn resource_name(resource: &Option<NamedResource>) -> Option<String> {
    resource.as_ref().map(|r| r.name.clone())
}

impl EvolutionConditions {
    pub fn from_detail(detail: &EvolutionDetail) -> Self {
        Self {
            min_level: detail.min_level,
            item: resource_name(&detail.item),
            held_item: resource_name(&detail.held_item),
            min_happiness: detail.min_happiness,
            min_affection: detail.min_affection,
            min_beauty: detail.min_beauty,
            time_of_day: Some(detail.time_of_day.clone()).filter(|t| !t.is_empty()),
            known_move: resource_name(&detail.known_move),
            known_move_type: resource_name(&detail.known_move_type),
            location: resource_name(&detail.location),
            gender: detail.gender,
            party_species: resource_name(&detail.party_species),
            party_type: resource_name(&detail.party_type),
            relative_physical_stats: detail.relative_physical_stats,
            trade_species: resource_name(&detail.trade_species),
            needs_overworld_rain: detail.needs_overworld_rain,
            turn_upside_down: detail.turn_upside_down,
        }
    }
}

impl Trigger {
    /// Decode the trigger of an edge; `None` when the detail names no trigger
    pub fn from_detail(detail: &EvolutionDetail) -> Option<Self> {
        let trigger = detail.trigger.as_ref()?;
        Some(match trigger.name.as_str() {
            LEVEL_UP => Trigger::LevelUp {
                min_level: detail.min_level,
            },
            USE_ITEM => Trigger::UseItem {
                item: resource_name(&detail.item),
            },
            kind => Trigger::Other {
                kind: kind.to_string(),
                conditions: EvolutionConditions::from_detail(detail),
            },
        })
    }

    pub fn kind(&self) -> &str {
        match self {
            Trigger::LevelUp { .. } => LEVEL_UP,
            Trigger::UseItem { .. } => USE_ITEM,
            Trigger::Other { kind, .. } => kind,
        }
    }

    pub fn requirement(&self) -> Requirement {
        match self {
            Trigger::LevelUp { min_level } => Requirement::Level {
                min_level: *min_level,
            },
            Trigger::UseItem { item } => Requirement::Item { item: item.clone() },
            Trigger::Other { conditions, .. } => Requirement::Conditions(conditions.clone()),
        }
    }
}

impl EvolutionEdge {
    pub fn from_detail(detail: &EvolutionDetail) -> Self {
        Self {
            min_level: detail.min_level,
            trigger: Trigger::from_detail(detail),
        }
    }
}

impl EvolutionNode {
    /// Build the tree from an upstream chain link
    ///
    /// Each edge is decoded from the first `evolution_details` entry of the
    /// child; further entries (alternative methods) are ignored.
    pub fn from_chain(root: &ChainLink) -> Self {
        // Pre-order list of every non-root link with its parent's index
        // (`None` for children of the root).
        let mut flat: Vec<(Option<usize>, Branch)> = Vec::new();
        let mut pending: Vec<(&ChainLink, Option<usize>)> =
            root.evolves_to.iter().rev().map(|child| (child, None)).collect();
        while let Some((link, parent)) = pending.pop() {
            let index = flat.len();
            flat.push((
                parent,
                Branch {
                    edge: link.evolution_details.first().map(EvolutionEdge::from_detail),
                    node: Self::leaf(link),
                },
            ));
            pending.extend(link.evolves_to.iter().rev().map(|child| (child, Some(index))));
        }

        // Children come after their parent, so draining from the back
        // completes each subtree before it is attached. Siblings arrive
        // last-first and are reversed once complete.
        let mut tree = Self::leaf(root);
        while let Some((parent, mut branch)) = flat.pop() {
            branch.node.branches.reverse();
            match parent {
                Some(index) => flat[index].1.node.branches.push(branch),
                None => tree.branches.push(branch),
            }
        }
        tree.branches.reverse();
        tree
    }

    fn leaf(link: &ChainLink) -> Self {
        Self {
            species: link.species.name.clone(),
            branches: Vec::new(),
        }
    }

    /// Number of nodes in the subtree rooted here
    pub fn size(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(node.branches.iter().map(|b| &b.node));
        }
        count
    }
}

impl EvolutionStep {
    fn from_branch(branch: &Branch) -> Self {
        let trigger = branch.edge.as_ref().and_then(|e| e.trigger.as_ref());
        EvolutionStep::Evolution {
            evolve_to: branch.node.species.clone(),
            trigger: trigger.map(|t| t.kind().to_string()),
            requirement: trigger.map(Trigger::requirement),
        }
    }
}

/// Root-first walk that only ever follows the first branch
pub fn flatten_first_path(root: &EvolutionNode) -> Vec<EvolutionStage> {
    let mut stages = vec![EvolutionStage {
        species_name: root.species.clone(),
        min_level: None,
    }];

    let mut current = root;
    while let Some(branch) = current.branches.first() {
        stages.push(EvolutionStage {
            species_name: branch.node.species.clone(),
            min_level: branch.edge.as_ref().and_then(|e| e.min_level),
        });
        current = &branch.node;
    }

    stages
}

/// Depth-first, left-to-right walk over every branch
pub fn walk_all_branches(root: &EvolutionNode) -> Vec<EvolutionStep> {
    let mut steps = vec![EvolutionStep::Base {
        species_name: root.species.clone(),
    }];

    let mut pending: Vec<&Branch> = root.branches.iter().rev().collect();
    while let Some(branch) = pending.pop() {
        steps.push(EvolutionStep::from_branch(branch));
        pending.extend(branch.node.branches.iter().rev());
    }

    steps
}
