//! Picks the moves a combatant can use in a battle.

use crate::battle::state::BattleRng;
use crate::combatant::MAX_MOVES;
use crate::moves::Move;
use crate::provider::DataProvider;
use schema::LearnableMove;

/// A learnset entry whose details could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveLookupFailure {
    pub move_ref: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoveSelection {
    pub moves: Vec<Move>,
    pub failures: Vec<MoveLookupFailure>,
}

/// Builds a move set from a learnset:
///
/// 1. keep entries with `min_level <= level`;
/// 2. resolve each through `provider`, skipping (and reporting) failures;
/// 3. drop moves without power;
/// 4. if more than `max_moves` remain, pick `max_moves` of them uniformly
///    without replacement.
///
/// `max_moves` is capped at four. An empty selection is not an error.
pub fn select_moves(
    learnset: &[LearnableMove],
    level: u8,
    max_moves: usize,
    provider: &dyn DataProvider,
    rng: &mut BattleRng,
) -> MoveSelection {
    let mut selection = MoveSelection::default();

    for entry in learnset.iter().filter(|entry| entry.min_level <= level) {
        match provider.fetch_move(&entry.move_ref) {
            Ok(details) => {
                if let Some(move_) = Move::from_details(details) {
                    selection.moves.push(move_);
                }
            }
            Err(err) => {
                tracing::warn!(move_ref = %entry.move_ref, error = %err, "move lookup failed");
                selection.failures.push(MoveLookupFailure {
                    move_ref: entry.move_ref.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }

    let limit = max_moves.min(MAX_MOVES);
    if selection.moves.len() > limit {
        sample_in_place(&mut selection.moves, limit, rng);
    }
    selection
}

/// Partial Fisher-Yates: after this, `moves` holds `count` distinct entries
/// drawn uniformly from the original list.
fn sample_in_place(moves: &mut Vec<Move>, count: usize, rng: &mut BattleRng) {
    let len = moves.len();
    for slot in 0..count {
        let pick = rng.roll(slot as u32..=(len - 1) as u32, "move sampling") as usize;
        moves.swap(slot, pick);
    }
    moves.truncate(count);
}
