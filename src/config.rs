//! Runtime configuration, read from a RON file.
//!
//! Every field has a default, so an empty `()` file (or no file at all) gives
//! a level-30 duel between the three Kanto starters fetched from PokeAPI.

use crate::battle::ai::{MovePolicy, RandomPolicy, StrongestMovePolicy};
use crate::errors::{ConfigError, DataResult};
use crate::pokeapi::PokeApiProvider;
use crate::provider::{CachingProvider, DataProvider, StaticDataProvider};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "POKEMON_DUEL_CONFIG";

pub const DEFAULT_POKEAPI_URL: &str = "https://pokeapi.co/api/v2";

/// Numeric rules of a duel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleRules {
    pub heal_amount: u16,
    pub heal_items: u8,
    pub max_moves: usize,
    /// A critical hit lands when a roll in `1..=critical_denominator` is at
    /// most this value.
    pub critical_threshold: u32,
    pub critical_denominator: u32,
    pub critical_multiplier: f64,
    pub same_type_multiplier: f64,
}

impl Default for BattleRules {
    fn default() -> Self {
        BattleRules {
            heal_amount: crate::combatant::DEFAULT_HEAL_AMOUNT,
            heal_items: crate::combatant::DEFAULT_HEAL_ITEMS,
            max_moves: crate::combatant::MAX_MOVES,
            critical_threshold: 625,
            critical_denominator: 10_000,
            critical_multiplier: 1.5,
            same_type_multiplier: 1.5,
        }
    }
}

fn default_pokeapi_url() -> String {
    DEFAULT_POKEAPI_URL.to_string()
}

fn default_version_group() -> String {
    "red-blue".to_string()
}

fn default_learn_method() -> String {
    "level-up".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataSource {
    PokeApi {
        #[serde(default = "default_pokeapi_url")]
        base_url: String,
        #[serde(default = "default_version_group")]
        version_group: String,
        #[serde(default = "default_learn_method")]
        learn_method: String,
    },
    /// A RON dataset on disk, see [`crate::provider::Dataset`].
    File { path: PathBuf },
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::PokeApi {
            base_url: default_pokeapi_url(),
            version_group: default_version_group(),
            learn_method: default_learn_method(),
        }
    }
}

impl DataSource {
    /// Opens the provider this source describes. Remote lookups are memoised
    /// so a replay does not refetch every move.
    pub fn connect(&self) -> DataResult<Box<dyn DataProvider>> {
        match self {
            DataSource::PokeApi {
                base_url,
                version_group,
                learn_method,
            } => {
                let provider = PokeApiProvider::new(base_url, version_group, learn_method)?;
                Ok(Box::new(CachingProvider::new(provider)))
            }
            DataSource::File { path } => Ok(Box::new(StaticDataProvider::load(path)?)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RivalPolicy {
    #[default]
    Random,
    Strongest,
}

impl RivalPolicy {
    pub fn build(self, rules: &BattleRules) -> Box<dyn MovePolicy> {
        match self {
            RivalPolicy::Random => Box::new(RandomPolicy),
            RivalPolicy::Strongest => Box::new(StrongestMovePolicy::new(rules)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    pub level: u8,
    pub roster: Vec<String>,
    pub rules: BattleRules,
    pub data_source: DataSource,
    pub rival_policy: RivalPolicy,
    /// Fixed RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Pause between narrated events in the terminal, in milliseconds.
    pub message_delay_ms: u64,
}

impl Default for BattleConfig {
    fn default() -> Self {
        BattleConfig {
            level: 30,
            roster: vec![
                "bulbasaur".to_string(),
                "charmander".to_string(),
                "squirtle".to_string(),
            ],
            rules: BattleRules::default(),
            data_source: DataSource::default(),
            rival_policy: RivalPolicy::default(),
            seed: None,
            message_delay_ms: 0,
        }
    }
}

impl BattleConfig {
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.level == 0 {
            return Err(ConfigError::InvalidLevel(self.level));
        }
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_ron_str(&source)
    }

    /// Loads the file named by `POKEMON_DUEL_CONFIG`, or the defaults when it is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                tracing::info!(path = ?path, "loading config");
                Self::load(Path::new(&path))
            }
            None => Ok(Self::default()),
        }
    }
}
