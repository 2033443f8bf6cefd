use crate::PokemonType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub speed: u16,
}

/// One entry of a species' level-up catalog, already restricted to a single
/// game version group and learn method by whoever produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnableMove {
    /// Identifier handed back to the provider to resolve the move (a PokeAPI
    /// URL, or a plain move name for file-backed data).
    pub move_ref: String,
    pub min_level: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesStats {
    pub name: String,
    pub base_stats: BaseStats,
    pub types: Vec<PokemonType>,
    #[serde(default)]
    pub learnable_moves: Vec<LearnableMove>,
}
