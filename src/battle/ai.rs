//! Move selection for the computer-controlled rival.

use crate::battle::calculators::expected_damage;
use crate::battle::state::BattleRng;
use crate::combatant::Combatant;
use crate::config::BattleRules;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::fmt;

/// Decides which of the attacker's available moves to use.
///
/// Returns `None` only when the attacker has no moves; the rival then passes.
pub trait MovePolicy: fmt::Debug {
    fn choose_move(
        &self,
        attacker: &Combatant,
        defender: &Combatant,
        rng: &mut BattleRng,
    ) -> Option<usize>;
}

/// Uniform pick among the available moves.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPolicy;

impl MovePolicy for RandomPolicy {
    fn choose_move(
        &self,
        attacker: &Combatant,
        _defender: &Combatant,
        rng: &mut BattleRng,
    ) -> Option<usize> {
        rng.pick_index(attacker.available_moves().len(), "rival move choice")
    }
}

/// Always uses the move with the highest expected damage against the current
/// defender. Ties go to the earlier move. Consumes no randomness.
#[derive(Debug, Clone)]
pub struct StrongestMovePolicy {
    rules: BattleRules,
}

impl StrongestMovePolicy {
    pub fn new(rules: &BattleRules) -> Self {
        Self {
            rules: rules.clone(),
        }
    }
}

impl MovePolicy for StrongestMovePolicy {
    fn choose_move(
        &self,
        attacker: &Combatant,
        defender: &Combatant,
        _rng: &mut BattleRng,
    ) -> Option<usize> {
        attacker
            .available_moves()
            .iter()
            .enumerate()
            .max_by_key(|(index, move_)| {
                let score = expected_damage(attacker, defender, move_, &self.rules);
                (OrderedFloat(score), Reverse(*index))
            })
            .map(|(index, _)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::Move;
    use pretty_assertions::assert_eq;
    use schema::{BaseStats, PokemonType};

    fn charmander_with(moves: Vec<Move>) -> Combatant {
        let mut charmander = Combatant::new(
            "charmander",
            30,
            &BaseStats { hp: 39, attack: 52, defense: 43, speed: 65 },
            vec![PokemonType::Fire],
            Vec::new(),
        );
        charmander.set_available_moves(moves);
        charmander
    }

    fn bulbasaur() -> Combatant {
        Combatant::new(
            "bulbasaur",
            30,
            &BaseStats { hp: 45, attack: 49, defense: 49, speed: 45 },
            vec![PokemonType::Grass, PokemonType::Poison],
            Vec::new(),
        )
    }

    #[test]
    fn test_random_policy_uses_rng_index() {
        let charmander = charmander_with(vec![
            Move::new("scratch", 40, PokemonType::Normal).unwrap(),
            Move::new("ember", 40, PokemonType::Fire).unwrap(),
            Move::new("rage", 20, PokemonType::Normal).unwrap(),
        ]);
        let mut rng = BattleRng::new_for_test(vec![2]);

        assert_eq!(RandomPolicy.choose_move(&charmander, &bulbasaur(), &mut rng), Some(2));
    }

    #[test]
    fn test_policies_pass_without_moves() {
        let charmander = charmander_with(Vec::new());
        let mut rng = BattleRng::new_for_test(vec![]);

        assert_eq!(RandomPolicy.choose_move(&charmander, &bulbasaur(), &mut rng), None);
        let strongest = StrongestMovePolicy::new(&BattleRules::default());
        assert_eq!(strongest.choose_move(&charmander, &bulbasaur(), &mut rng), None);
    }

    #[test]
    fn test_strongest_policy_counts_same_type_bonus() {
        // Ember and scratch share power; only ember gets the fire bonus.
        let charmander = charmander_with(vec![
            Move::new("scratch", 40, PokemonType::Normal).unwrap(),
            Move::new("ember", 40, PokemonType::Fire).unwrap(),
            Move::new("rage", 20, PokemonType::Normal).unwrap(),
        ]);
        let mut rng = BattleRng::new_for_test(vec![]);
        let strongest = StrongestMovePolicy::new(&BattleRules::default());

        assert_eq!(strongest.choose_move(&charmander, &bulbasaur(), &mut rng), Some(1));
    }

    #[test]
    fn test_strongest_policy_breaks_ties_by_lowest_index() {
        let charmander = charmander_with(vec![
            Move::new("rage", 20, PokemonType::Normal).unwrap(),
            Move::new("scratch", 40, PokemonType::Normal).unwrap(),
            Move::new("tackle", 40, PokemonType::Normal).unwrap(),
        ]);
        let mut rng = BattleRng::new_for_test(vec![]);
        let strongest = StrongestMovePolicy::new(&BattleRules::default());

        assert_eq!(strongest.choose_move(&charmander, &bulbasaur(), &mut rng), Some(1));
    }
}
