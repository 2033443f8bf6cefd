use crate::moves::{title_case, Move};
use schema::{BaseStats, LearnableMove, PokemonType, SpeciesStats};
use serde::{Deserialize, Serialize};

/// Heal items every combatant starts a battle with.
pub const DEFAULT_HEAL_ITEMS: u8 = 3;
/// Health restored by one heal item.
pub const DEFAULT_HEAL_AMOUNT: u16 = 30;
/// Upper bound on a combatant's move set.
pub const MAX_MOVES: usize = 4;

/// A battle participant.
///
/// Health and inventory are private so every change goes through a method
/// that keeps `0 <= current_health <= max_health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub name: String,
    pub level: u8,
    pub attack: u16,
    pub defense: u16,
    pub speed: u16,
    pub types: Vec<PokemonType>,
    max_health: u16,
    current_health: u16,
    available_moves: Vec<Move>,
    heal_items: u8,
    starting_heal_items: u8,
    learnset: Vec<LearnableMove>,
}

impl Combatant {
    /// Builds a combatant at full health with an empty move set.
    /// Only health scales with level: `max_health = base hp + level`.
    pub fn new(
        name: impl Into<String>,
        level: u8,
        base_stats: &BaseStats,
        types: Vec<PokemonType>,
        learnset: Vec<LearnableMove>,
    ) -> Self {
        let max_health = base_stats.hp.saturating_add(level as u16);
        Combatant {
            name: name.into(),
            level,
            attack: base_stats.attack,
            defense: base_stats.defense,
            speed: base_stats.speed,
            types,
            max_health,
            current_health: max_health,
            available_moves: Vec::new(),
            heal_items: DEFAULT_HEAL_ITEMS,
            starting_heal_items: DEFAULT_HEAL_ITEMS,
            learnset,
        }
    }

    pub fn from_species(species: &SpeciesStats, level: u8) -> Self {
        Combatant::new(
            species.name.clone(),
            level,
            &species.base_stats,
            species.types.clone(),
            species.learnable_moves.clone(),
        )
    }

    /// Overrides the starting heal-item count. Also what `reset` restores.
    pub fn with_heal_items(mut self, count: u8) -> Self {
        self.heal_items = count;
        self.starting_heal_items = count;
        self
    }

    pub fn display_name(&self) -> String {
        title_case(&self.name)
    }

    pub fn current_health(&self) -> u16 {
        self.current_health
    }

    pub fn max_health(&self) -> u16 {
        self.max_health
    }

    pub fn heal_items(&self) -> u8 {
        self.heal_items
    }

    pub fn available_moves(&self) -> &[Move] {
        &self.available_moves
    }

    pub fn learnset(&self) -> &[LearnableMove] {
        &self.learnset
    }

    pub fn is_fainted(&self) -> bool {
        self.current_health == 0
    }

    pub fn has_type(&self, pokemon_type: PokemonType) -> bool {
        self.types.contains(&pokemon_type)
    }

    /// Replaces the move set. Anything past the fourth move is dropped.
    pub fn set_available_moves(&mut self, mut moves: Vec<Move>) {
        moves.truncate(MAX_MOVES);
        self.available_moves = moves;
    }

    /// Sets current health, clamped to `[0, max_health]`.
    pub fn set_health(&mut self, health: u16) {
        self.current_health = health.min(self.max_health);
    }

    /// Removes up to `damage` health. Returns true if this knocked the combatant out.
    pub fn take_damage(&mut self, damage: u16) -> bool {
        let was_fainted = self.is_fainted();
        self.current_health = self.current_health.saturating_sub(damage);
        !was_fainted && self.is_fainted()
    }

    /// Restores up to `amount` health and returns how much was actually restored.
    pub fn heal(&mut self, amount: u16) -> u16 {
        let before = self.current_health;
        self.current_health = self.current_health.saturating_add(amount).min(self.max_health);
        self.current_health - before
    }

    /// Spends one heal item restoring `amount` health.
    ///
    /// Returns `None` without touching anything when the inventory is empty,
    /// otherwise the health actually restored (zero at full health; the item is
    /// still spent).
    pub fn use_heal_item(&mut self, amount: u16) -> Option<u16> {
        if self.heal_items == 0 {
            return None;
        }
        self.heal_items -= 1;
        Some(self.heal(amount))
    }

    /// Restores the state the combatant had when it joined the roster.
    pub fn reset(&mut self) {
        self.current_health = self.max_health;
        self.heal_items = self.starting_heal_items;
        self.available_moves.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn squirtle() -> Combatant {
        Combatant::new(
            "squirtle",
            30,
            &BaseStats { hp: 44, attack: 48, defense: 65, speed: 43 },
            vec![PokemonType::Water],
            Vec::new(),
        )
    }

    #[test]
    fn test_health_scales_with_level_only() {
        let squirtle = squirtle();
        assert_eq!(squirtle.max_health(), 74);
        assert_eq!(squirtle.current_health(), 74);
        assert_eq!(squirtle.attack, 48);
        assert_eq!(squirtle.defense, 65);
        assert_eq!(squirtle.heal_items(), DEFAULT_HEAL_ITEMS);
        assert_eq!(squirtle.display_name(), "Squirtle");
    }

    #[test]
    fn test_take_damage_clamps_at_zero() {
        let mut squirtle = squirtle();
        assert!(!squirtle.take_damage(70));
        assert_eq!(squirtle.current_health(), 4);

        assert!(squirtle.take_damage(12));
        assert_eq!(squirtle.current_health(), 0);
        assert!(squirtle.is_fainted());

        // Already down: no second knockout.
        assert!(!squirtle.take_damage(5));
        assert_eq!(squirtle.current_health(), 0);
    }

    #[test]
    fn test_heal_item_clamps_to_max_health() {
        let mut squirtle = squirtle().with_heal_items(1);
        squirtle.set_health(squirtle.max_health() - 10);

        assert_eq!(squirtle.use_heal_item(DEFAULT_HEAL_AMOUNT), Some(10));
        assert_eq!(squirtle.current_health(), squirtle.max_health());
        assert_eq!(squirtle.heal_items(), 0);
    }

    #[test]
    fn test_heal_item_at_zero_inventory_is_a_no_op() {
        let mut squirtle = squirtle().with_heal_items(0);
        squirtle.set_health(20);

        for _ in 0..3 {
            assert_eq!(squirtle.use_heal_item(DEFAULT_HEAL_AMOUNT), None);
            assert_eq!(squirtle.current_health(), 20);
            assert_eq!(squirtle.heal_items(), 0);
        }
    }

    #[test]
    fn test_move_set_is_capped() {
        let mut squirtle = squirtle();
        let moves = (1..=6)
            .map(|i| Move::new(format!("move-{i}"), 10 * i, PokemonType::Water).unwrap())
            .collect();
        squirtle.set_available_moves(moves);
        assert_eq!(squirtle.available_moves().len(), MAX_MOVES);
        assert_eq!(squirtle.available_moves()[3].name(), "move-4");
    }

    #[test]
    fn test_reset_restores_starting_values() {
        let mut squirtle = squirtle().with_heal_items(2);
        squirtle.take_damage(50);
        squirtle.use_heal_item(DEFAULT_HEAL_AMOUNT);
        squirtle.set_available_moves(vec![Move::new("bubble", 40, PokemonType::Water).unwrap()]);

        squirtle.reset();

        assert_eq!(squirtle.current_health(), squirtle.max_health());
        assert_eq!(squirtle.heal_items(), 2);
        assert!(squirtle.available_moves().is_empty());
    }

    proptest! {
        #[test]
        fn test_health_and_inventory_stay_in_bounds(
            hp in 1u16..=255,
            level in 1u8..=100,
            heal_items in 0u8..=5,
            heal_amount in 0u16..=400,
            steps in prop::collection::vec((any::<bool>(), 0u16..=400), 0..12),
        ) {
            let mut combatant = Combatant::new(
                "ditto",
                level,
                &BaseStats { hp, attack: 48, defense: 48, speed: 48 },
                vec![PokemonType::Normal],
                Vec::new(),
            )
            .with_heal_items(heal_items);

            for (heal, damage) in steps {
                let health_before = combatant.current_health();
                let items_before = combatant.heal_items();
                if heal {
                    match combatant.use_heal_item(heal_amount) {
                        Some(restored) => {
                            prop_assert_eq!(combatant.heal_items(), items_before - 1);
                            prop_assert_eq!(combatant.current_health(), health_before + restored);
                        }
                        None => {
                            prop_assert_eq!(items_before, 0);
                            prop_assert_eq!(combatant.current_health(), health_before);
                        }
                    }
                } else {
                    combatant.take_damage(damage);
                    prop_assert!(combatant.current_health() <= health_before);
                }
                prop_assert!(combatant.current_health() <= combatant.max_health());
                prop_assert!(combatant.heal_items() <= heal_items);
            }
        }
    }
}
