//! Core library for pokeagg
//!
//! This crate is the **Functional Core** of pokeagg: everything that
//! reshapes PokeAPI responses into the aggregated views, with zero I/O.
//!
//! - **`pokeagg_core`** (this crate): response models and pure transformations
//! - **`pokeagg`**: fetching, fan-out, failure policies and the CLI (the Imperative Shell)
//!
//! Because nothing here touches the network, every function is tested with
//! plain fixture data.
//!
//! # Module Organization
//!
//! - [`pokeapi`]: Deserializable models of the PokeAPI v2 resources that are read
//! - [`evolution`]: Typed evolution tree plus the first-path and all-branches walks
//! - [`detail`]: Ability/move/stat projections and the detailed record
//! - [`stats`]: Top-N ranking, per-stat leaders and grouping by type
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use pokeagg_core::evolution::{walk_all_branches, EvolutionNode};
//! use pokeagg_core::pokeapi::EvolutionChain;
//!
//! let chain: EvolutionChain = serde_json::from_str(payload)?;
//! let steps = walk_all_branches(&EvolutionNode::from_chain(&chain.chain));
//! ```

pub mod detail;
pub mod evolution;
pub mod pokeapi;
pub mod stats;
