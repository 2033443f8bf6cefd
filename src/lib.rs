//! Pokemon Duel
//!
//! A one-on-one turn-based battle between a player-chosen Pokemon and a
//! random rival, with species and move data fetched from PokeAPI or read
//! from a local RON dataset.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod combatant;
pub mod config;
pub mod errors;
pub mod learnset;
pub mod moves;
pub mod pokeapi;
pub mod provider;
pub mod roster;
pub mod terminal;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{BaseStats, LearnableMove, MoveDetails, PokemonType, SpeciesStats};

// --- From this crate's modules (`src/`) ---

// Battle engine and its state.
pub use battle::engine::BattleEngine;
pub use battle::state::{BattleEvent, BattleRng, BattleState, EventBus, Outcome, Side};
pub use battle::view::{BattleView, CombatantView};

// Runtime types.
pub use combatant::Combatant;
pub use config::{BattleConfig, BattleRules};
pub use moves::Move;
pub use provider::{CachingProvider, DataProvider, StaticDataProvider};

// Crate-specific error and result types.
pub use errors::{BattleError, BattleResult, ConfigError, DataError, DataResult};
