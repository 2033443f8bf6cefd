use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    PlayerWon,
    PlayerLost,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleState {
    SelectingCombatant,
    PreBattle,
    PlayerTurn,
    SelectingMove,
    RivalTurn,
    ResolvingEnd,
    GameOver(Outcome),
    Terminated,
}

impl BattleState {
    /// States the engine leaves on its own through `advance`.
    pub fn is_automatic(self) -> bool {
        matches!(
            self,
            BattleState::PreBattle | BattleState::RivalTurn | BattleState::ResolvingEnd
        )
    }

    /// States that wait on an intent from the player.
    pub fn awaits_input(self) -> bool {
        matches!(
            self,
            BattleState::SelectingCombatant
                | BattleState::PlayerTurn
                | BattleState::SelectingMove
                | BattleState::GameOver(_)
        )
    }

    pub fn is_terminated(self) -> bool {
        self == BattleState::Terminated
    }
}

impl fmt::Display for BattleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleState::GameOver(outcome) => write!(f, "GameOver({:?})", outcome),
            other => write!(f, "{:?}", other),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Player,
    Rival,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Rival,
            Side::Rival => Side::Player,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // Flow
    StateChanged {
        from: BattleState,
        to: BattleState,
    },
    RivalAppeared {
        rival: String,
    },
    BattleEnded {
        outcome: Outcome,
        winner: String,
        loser: String,
    },
    RosterReset,
    Terminated,

    // Move sets
    MovesAssigned {
        side: Side,
        combatant: String,
        moves: Vec<String>,
    },
    MoveLookupFailed {
        combatant: String,
        move_ref: String,
        reason: String,
    },
    NoUsableMoves {
        side: Side,
        combatant: String,
    },

    // Actions
    MoveUsed {
        side: Side,
        attacker: String,
        move_name: String,
    },
    SameTypeBonus {
        attacker: String,
    },
    CriticalHit {
        attacker: String,
    },
    DamageDealt {
        side: Side,
        target: String,
        damage: u16,
        remaining_health: u16,
    },
    Fainted {
        side: Side,
        combatant: String,
    },
    Passed {
        side: Side,
        combatant: String,
    },
    HealItemUsed {
        combatant: String,
        restored: u16,
        new_health: u16,
        items_left: u8,
    },
    NoHealItemsLeft {
        combatant: String,
    },
}

/// Ordered record of what one engine call did. The engine never formats
/// anything; front-ends read the bus and decide how to present it.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    /// Appends everything from another bus, keeping order.
    pub fn extend(&mut self, other: EventBus) {
        self.events.extend(other.events);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// Return true if the event bus contains no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Return the number of events in the bus.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl fmt::Display for EventBus {
    /// Debug format of all events, one per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for event in &self.events {
            writeln!(f, "  {:?}", event)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum RngSource {
    Entropy(StdRng),
    Scripted { outcomes: Vec<u32>, index: usize },
}

/// Every random draw the battle makes goes through here: rival pick, move
/// sampling, the rival's move choice and critical-hit rolls.
#[derive(Debug, Clone)]
pub struct BattleRng {
    source: RngSource,
}

impl BattleRng {
    pub fn new_random() -> Self {
        Self {
            source: RngSource::Entropy(StdRng::from_os_rng()),
        }
    }

    /// Reproducible stream for a given seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            source: RngSource::Entropy(StdRng::seed_from_u64(seed)),
        }
    }

    /// Replays `outcomes` in order. Each value is clamped into the range the
    /// caller asks for. Running out of values panics.
    pub fn new_for_test(outcomes: Vec<u32>) -> Self {
        Self {
            source: RngSource::Scripted { outcomes, index: 0 },
        }
    }

    pub fn roll(&mut self, range: RangeInclusive<u32>, reason: &str) -> u32 {
        let (low, high) = (*range.start(), *range.end());
        let outcome = match &mut self.source {
            RngSource::Entropy(rng) => rng.random_range(low..=high),
            RngSource::Scripted { outcomes, index } => {
                let Some(&value) = outcomes.get(*index) else {
                    panic!(
                        "BattleRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                        reason
                    );
                };
                *index += 1;
                value.clamp(low, high)
            }
        };
        tracing::trace!(outcome, reason, "rng roll");
        outcome
    }

    /// Uniform index into a collection of `len` items. A single candidate is
    /// returned without drawing.
    pub fn pick_index(&mut self, len: usize, reason: &str) -> Option<usize> {
        match len {
            0 => None,
            1 => Some(0),
            _ => Some(self.roll(0..=(len - 1) as u32, reason) as usize),
        }
    }
}
