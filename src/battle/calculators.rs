use crate::battle::state::BattleRng;
use crate::combatant::Combatant;
use crate::config::BattleRules;
use crate::errors::{BattleError, BattleResult};
use crate::moves::Move;

/// What one attack did to the defender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackOutcome {
    pub damage: u16,
    pub critical: bool,
    pub same_type_bonus: bool,
    pub remaining_health: u16,
    pub defender_fainted: bool,
}

/// Damage before any random or type modifier:
/// `(2 * level + 10) / 250 * attack / defense * power`, in floating point.
/// A zero defense counts as one.
pub fn base_damage(attacker: &Combatant, defender: &Combatant, move_used: &Move) -> f64 {
    let level_factor = (2.0 * attacker.level as f64 + 10.0) / 250.0;
    let defense = defender.defense.max(1) as f64;
    level_factor * attacker.attack as f64 / defense * move_used.power() as f64
}

pub fn has_same_type_bonus(attacker: &Combatant, move_used: &Move) -> bool {
    attacker.has_type(move_used.move_type())
}

/// Deterministic part of the damage: base damage with the same-type bonus applied.
pub fn expected_damage(
    attacker: &Combatant,
    defender: &Combatant,
    move_used: &Move,
    rules: &BattleRules,
) -> f64 {
    let damage = base_damage(attacker, defender, move_used);
    if has_same_type_bonus(attacker, move_used) {
        damage * rules.same_type_multiplier
    } else {
        damage
    }
}

/// Rolls for a critical hit: one draw in `1..=critical_denominator`, a hit
/// when it is at most `critical_threshold`.
pub fn roll_critical(rules: &BattleRules, rng: &mut BattleRng) -> bool {
    let roll = rng.roll(1..=rules.critical_denominator.max(1), "critical hit");
    roll <= rules.critical_threshold
}

/// Resolves one attack and applies the damage to `defender`.
///
/// Exactly one RNG draw (the critical roll) is consumed. Final damage is the
/// floor of the modified value; health saturates at zero.
pub fn resolve_attack(
    attacker: &Combatant,
    defender: &mut Combatant,
    move_used: &Move,
    rules: &BattleRules,
    rng: &mut BattleRng,
) -> BattleResult<AttackOutcome> {
    if attacker.is_fainted() {
        return Err(BattleError::AttackerFainted(attacker.name.clone()));
    }

    let same_type_bonus = has_same_type_bonus(attacker, move_used);
    let critical = roll_critical(rules, rng);

    let mut damage = expected_damage(attacker, defender, move_used, rules);
    if critical {
        damage *= rules.critical_multiplier;
    }
    let damage = damage.floor().clamp(0.0, u16::MAX as f64) as u16;

    let defender_fainted = defender.take_damage(damage);
    tracing::debug!(
        attacker = %attacker.name,
        defender = %defender.name,
        move_name = move_used.name(),
        damage,
        critical,
        same_type_bonus,
        "attack resolved"
    );

    Ok(AttackOutcome {
        damage,
        critical,
        same_type_bonus,
        remaining_health: defender.current_health(),
        defender_fainted,
    })
}
