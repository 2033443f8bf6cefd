use crate::battle::state::BattleState;
use crate::combatant::Combatant;
use serde::Serialize;

/// Read-only picture of one combatant for front-ends.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombatantView {
    pub name: String,
    pub display_name: String,
    pub level: u8,
    pub types: Vec<String>,
    pub current_health: u16,
    pub max_health: u16,
    pub is_fainted: bool,
    pub heal_items: u8,
    pub moves: Vec<MoveView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoveView {
    pub name: String,
    pub display_name: String,
    pub power: u16,
    pub move_type: String,
}

/// Everything a front-end needs to draw the current screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattleView {
    pub state: BattleState,
    pub roster: Vec<CombatantView>,
    pub player_index: Option<usize>,
    pub rival_index: Option<usize>,
}

impl BattleView {
    pub fn player(&self) -> Option<&CombatantView> {
        self.player_index.and_then(|index| self.roster.get(index))
    }

    pub fn rival(&self) -> Option<&CombatantView> {
        self.rival_index.and_then(|index| self.roster.get(index))
    }
}

impl From<&Combatant> for CombatantView {
    fn from(combatant: &Combatant) -> Self {
        CombatantView {
            name: combatant.name.clone(),
            display_name: combatant.display_name(),
            level: combatant.level,
            types: combatant.types.iter().map(|t| t.to_string()).collect(),
            current_health: combatant.current_health(),
            max_health: combatant.max_health(),
            is_fainted: combatant.is_fainted(),
            heal_items: combatant.heal_items(),
            moves: combatant
                .available_moves()
                .iter()
                .map(|move_| MoveView {
                    name: move_.name().to_string(),
                    display_name: move_.display_name(),
                    power: move_.power(),
                    move_type: move_.move_type().to_string(),
                })
                .collect(),
        }
    }
}
