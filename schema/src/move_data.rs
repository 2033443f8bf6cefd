use crate::PokemonType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Move metadata as a provider reports it. `power` is `None` for status moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveDetails {
    pub name: String,
    #[serde(default)]
    pub power: Option<u16>,
    pub move_type: PokemonType,
}

impl MoveDetails {
    /// Whether the move can deal damage at all.
    pub fn is_damaging(&self) -> bool {
        matches!(self.power, Some(power) if power > 0)
    }
}

impl fmt::Display for MoveDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.power {
            Some(power) => write!(f, "{} ({}, {} power)", self.name, self.move_type, power),
            None => write!(f, "{} ({}, status)", self.name, self.move_type),
        }
    }
}
