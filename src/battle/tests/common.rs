use crate::battle::engine::BattleEngine;
use crate::battle::state::{BattleEvent, BattleRng, BattleState, EventBus};
use crate::combatant::Combatant;
use crate::errors::BattleResult;
use crate::provider::{DataProvider, StaticDataProvider};

/// The offline dataset shipped with the crate.
pub const KANTO_DATASET: &str = include_str!("../../../data/kanto_starters.ron");

/// Critical roll that never crits under the default rules.
pub const NO_CRIT: u32 = 10_000;
/// Critical roll that always crits under the default rules.
pub const CRIT: u32 = 1;

pub fn kanto_provider() -> StaticDataProvider {
    match StaticDataProvider::from_ron_str(KANTO_DATASET) {
        Ok(provider) => provider,
        Err(err) => panic!("Failed to parse the bundled dataset: {}", err),
    }
}

/// A builder for test combatants taken from the bundled dataset.
///
/// # Example
/// ```ignore
/// let charmander = TestCombatantBuilder::new("charmander", 30).with_health(5).build();
/// ```
pub struct TestCombatantBuilder {
    name: String,
    level: u8,
    health: Option<u16>,
    heal_items: Option<u8>,
}

impl TestCombatantBuilder {
    pub fn new(name: &str, level: u8) -> Self {
        Self {
            name: name.to_string(),
            level,
            health: None,
            heal_items: None,
        }
    }

    /// Sets the current health. If not set, health will be max.
    pub fn with_health(mut self, health: u16) -> Self {
        self.health = Some(health);
        self
    }

    pub fn with_heal_items(mut self, count: u8) -> Self {
        self.heal_items = Some(count);
        self
    }

    pub fn build(self) -> Combatant {
        let species = match kanto_provider().fetch_species(&self.name) {
            Ok(species) => species,
            Err(err) => panic!("Failed to load species data for {}: {}", self.name, err),
        };
        let mut combatant = Combatant::from_species(&species, self.level);
        if let Some(count) = self.heal_items {
            combatant = combatant.with_heal_items(count);
        }
        if let Some(health) = self.health {
            combatant.set_health(health);
        }
        combatant
    }
}

/// Level-30 combatants straight from the dataset.
pub fn level_30(names: &[&str]) -> Vec<Combatant> {
    names
        .iter()
        .map(|name| TestCombatantBuilder::new(name, 30).build())
        .collect()
}

/// Engine over the bundled dataset with a scripted RNG.
pub fn create_test_engine(roster: Vec<Combatant>, rng_values: Vec<u32>) -> BattleEngine {
    create_test_engine_with_provider(roster, kanto_provider(), rng_values)
}

pub fn create_test_engine_with_provider(
    roster: Vec<Combatant>,
    provider: StaticDataProvider,
    rng_values: Vec<u32>,
) -> BattleEngine {
    assert_ok(BattleEngine::new(roster, Box::new(provider))).with_rng(BattleRng::new_for_test(rng_values))
}

/// Selects `player`, and advances to the player's first turn.
pub fn start_battle(engine: &mut BattleEngine, player: usize) -> EventBus {
    let mut bus = assert_ok(engine.select_combatant(player));
    bus.extend(assert_ok(engine.run_until_input()));
    assert_eq!(engine.state(), BattleState::PlayerTurn);
    bus
}

/// States entered, in order, according to the bus.
pub fn states_entered(bus: &EventBus) -> Vec<BattleState> {
    bus.events()
        .iter()
        .filter_map(|event| match event {
            BattleEvent::StateChanged { to, .. } => Some(*to),
            _ => None,
        })
        .collect()
}

pub fn move_names(combatant: &Combatant) -> Vec<&str> {
    combatant.available_moves().iter().map(|m| m.name()).collect()
}

/// Helper function to assert that a Result is Ok and return the value.
/// Provides clear error messages in tests when functions unexpectedly fail.
pub fn assert_ok<T>(result: BattleResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("Expected Ok but got error: {}", err),
    }
}
