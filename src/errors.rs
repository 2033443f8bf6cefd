use crate::battle::state::BattleState;
use schema::SchemaError;
use thiserror::Error;

/// Main error type for the duel engine.
#[derive(Debug, Error)]
pub enum BattleError {
    /// An intent arrived while the state machine could not accept it.
    /// Nothing was mutated.
    #[error("cannot {action} while in state {state}")]
    InvalidTransition {
        state: BattleState,
        action: &'static str,
    },
    #[error("invalid move index: {0}")]
    InvalidMoveIndex(usize),
    #[error("invalid roster index: {0}")]
    InvalidRosterIndex(usize),
    #[error("{0} has fainted and cannot attack")]
    AttackerFainted(String),
    #[error("a battle needs at least two combatants, roster has {0}")]
    RosterTooSmall(usize),
    #[error("data unavailable: {0}")]
    DataUnavailable(#[from] DataError),
}

/// Errors raised by a data provider lookup.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("{kind} '{name}' not found")]
    NotFound { kind: &'static str, name: String },
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("request to {url} returned status {status}")]
    Status { url: String, status: u16 },
    /// The body of a successful response did not match the expected shape.
    #[error("malformed response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("malformed record: {0}")]
    Malformed(#[from] SchemaError),
    #[error("failed to read data file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse data file: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

impl DataError {
    pub fn species_not_found(name: &str) -> Self {
        DataError::NotFound {
            kind: "species",
            name: name.to_string(),
        }
    }

    pub fn move_not_found(move_ref: &str) -> Self {
        DataError::NotFound {
            kind: "move",
            name: move_ref.to_string(),
        }
    }

    /// Whether the lookup reached the source and the source had no such record.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DataError::NotFound { .. })
    }
}

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("level must be at least 1, got {0}")]
    InvalidLevel(u8),
}

/// Type alias for Results using BattleError
pub type BattleResult<T> = Result<T, BattleError>;

/// Type alias for Results using DataError
pub type DataResult<T> = Result<T, DataError>;
