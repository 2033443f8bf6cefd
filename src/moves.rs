use schema::{MoveDetails, PokemonType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An attack a combatant can use. Immutable once built; cloning is cheap
/// enough that combatants each hold their own copy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    name: String,
    power: u16,
    move_type: PokemonType,
}

impl Move {
    /// Builds a move, refusing zero power.
    pub fn new(name: impl Into<String>, power: u16, move_type: PokemonType) -> Option<Self> {
        (power > 0).then(|| Move {
            name: name.into(),
            power,
            move_type,
        })
    }

    /// Converts provider metadata into a combat move.
    /// Status moves (no power) have no combat counterpart and yield `None`.
    pub fn from_details(details: MoveDetails) -> Option<Self> {
        if !details.is_damaging() {
            return None;
        }
        Move::new(details.name, details.power?, details.move_type)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn power(&self) -> u16 {
        self.power
    }

    pub fn move_type(&self) -> PokemonType {
        self.move_type
    }

    /// Human-readable name: `"vine-whip"` becomes `"Vine Whip"`.
    pub fn display_name(&self) -> String {
        title_case(&self.name)
    }
}

/// Turns a data-source identifier (`"vine-whip"`, `"mr_mime"`) into a display name.
pub fn title_case(identifier: &str) -> String {
    identifier
        .split(['-', '_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
