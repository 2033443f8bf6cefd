//! Typed view of the PokeAPI v2 responses the duel engine consumes.
//!
//! Only the fields the engine reads are modelled; serde ignores the rest of
//! the (very large) payloads. Conversion into [`SpeciesStats`] and
//! [`MoveDetails`] happens up front so a missing stat or an unknown type tag
//! surfaces when the record is loaded, not halfway through a battle.

use crate::{BaseStats, LearnableMove, MoveDetails, PokemonType, SchemaError, SpeciesStats};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatEntry {
    pub base_stat: u16,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeSlot {
    pub slot: u8,
    #[serde(rename = "type")]
    pub type_: NamedResource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionGroupDetail {
    pub level_learned_at: u8,
    pub move_learn_method: NamedResource,
    pub version_group: NamedResource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveEntry {
    #[serde(rename = "move")]
    pub move_: NamedResource,
    #[serde(default)]
    pub version_group_details: Vec<VersionGroupDetail>,
}

/// `GET /pokemon/{name}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonResponse {
    pub name: String,
    pub stats: Vec<StatEntry>,
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub moves: Vec<MoveEntry>,
}

/// `GET /move/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveResponse {
    pub name: String,
    pub power: Option<u16>,
    #[serde(rename = "type")]
    pub type_: NamedResource,
}

/// Which slice of a species' move list counts as its learnset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LearnsetFilter<'a> {
    pub version_group: &'a str,
    pub learn_method: &'a str,
}

impl PokemonResponse {
    fn base_stat(&self, stat: &'static str) -> Result<u16, SchemaError> {
        self.stats
            .iter()
            .find(|entry| entry.stat.name == stat)
            .map(|entry| entry.base_stat)
            .ok_or_else(|| SchemaError::MissingStat {
                species: self.name.clone(),
                stat,
            })
    }

    pub fn into_species_stats(self, filter: LearnsetFilter<'_>) -> Result<SpeciesStats, SchemaError> {
        let base_stats = BaseStats {
            hp: self.base_stat("hp")?,
            attack: self.base_stat("attack")?,
            defense: self.base_stat("defense")?,
            speed: self.base_stat("speed")?,
        };

        let mut slots = self.types.clone();
        slots.sort_by_key(|slot| slot.slot);
        let types = slots
            .iter()
            .map(|slot| PokemonType::from_tag(&slot.type_.name))
            .collect::<Result<Vec<_>, _>>()?;
        if types.is_empty() {
            return Err(SchemaError::NoTypes(self.name));
        }

        // A move can be listed once per matching detail; each match is kept.
        let learnable_moves = self
            .moves
            .iter()
            .flat_map(|entry| {
                entry
                    .version_group_details
                    .iter()
                    .filter(|detail| {
                        detail.version_group.name == filter.version_group
                            && detail.move_learn_method.name == filter.learn_method
                    })
                    .map(|detail| LearnableMove {
                        move_ref: move_reference(&entry.move_),
                        min_level: detail.level_learned_at,
                    })
            })
            .collect();

        Ok(SpeciesStats {
            name: self.name,
            base_stats,
            types,
            learnable_moves,
        })
    }
}

impl MoveResponse {
    pub fn into_move_details(self) -> Result<MoveDetails, SchemaError> {
        Ok(MoveDetails {
            move_type: PokemonType::from_tag(&self.type_.name)?,
            name: self.name,
            power: self.power,
        })
    }
}

fn move_reference(resource: &NamedResource) -> String {
    if resource.url.is_empty() {
        resource.name.clone()
    } else {
        resource.url.clone()
    }
}
