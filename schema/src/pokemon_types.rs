use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString};

use crate::SchemaError;

/// Elemental type tag carried by species and moves.
///
/// Displays and parses as the lowercase tag the data sources use
/// (`"fire"`, `"water"`, ...). Only the same-type bonus reads it; there is no
/// effectiveness chart.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PokemonType {
    Normal,
    Fighting,
    Flying,
    Poison,
    Ground,
    Rock,
    Bug,
    Ghost,
    Steel,
    Fire,
    Water,
    Grass,
    Electric,
    Psychic,
    Ice,
    Dragon,
    Dark,
    Fairy,
}

impl PokemonType {
    /// Parses a data-source type tag, reporting unknown tags as a schema error.
    pub fn from_tag(tag: &str) -> Result<PokemonType, SchemaError> {
        PokemonType::from_str(tag).map_err(|_| SchemaError::UnknownType(tag.to_string()))
    }
}
