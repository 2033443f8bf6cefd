// Pokemon Duel Schema - Shared data definitions
// Plain records describing species and moves as the data providers deliver
// them, plus the typed wire format of the public PokeAPI.

pub use move_data::*;
pub use pokemon_types::*;
pub use species_data::*;

pub mod move_data;
pub mod pokeapi;
pub mod pokemon_types;
pub mod species_data;

use thiserror::Error;

/// A record that deserialized fine but cannot describe a usable species or move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("species '{species}' is missing the '{stat}' base stat")]
    MissingStat { species: String, stat: &'static str },
    #[error("species '{0}' has no types")]
    NoTypes(String),
    #[error("unknown elemental type '{0}'")]
    UnknownType(String),
}
