use crate::combatant::Combatant;
use crate::config::BattleRules;
use crate::errors::{DataError, DataResult};
use crate::provider::DataProvider;

/// A roster entry that could not be built.
#[derive(Debug)]
pub struct RosterFailure {
    pub name: String,
    pub error: DataError,
}

#[derive(Debug, Default)]
pub struct Roster {
    pub combatants: Vec<Combatant>,
    pub failures: Vec<RosterFailure>,
}

/// Fetches one species and turns it into a full-health combatant.
pub fn fetch_combatant(
    provider: &dyn DataProvider,
    name: &str,
    level: u8,
    rules: &BattleRules,
) -> DataResult<Combatant> {
    let species = provider.fetch_species(name)?;
    Ok(Combatant::from_species(&species, level).with_heal_items(rules.heal_items))
}

/// Builds the roster in the order given. Names that fail to load are left
/// out and reported; whether enough remain to battle is the engine's call.
pub fn build_roster(
    provider: &dyn DataProvider,
    names: &[String],
    level: u8,
    rules: &BattleRules,
) -> Roster {
    let mut roster = Roster::default();
    for name in names {
        match fetch_combatant(provider, name, level, rules) {
            Ok(combatant) => {
                tracing::debug!(name = %combatant.name, max_health = combatant.max_health(), "roster entry loaded");
                roster.combatants.push(combatant);
            }
            Err(error) => {
                tracing::warn!(name = %name, error = %error, "failed to load roster entry");
                roster.failures.push(RosterFailure {
                    name: name.clone(),
                    error,
                });
            }
        }
    }
    roster
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::StaticDataProvider;
    use pretty_assertions::assert_eq;
    use schema::{BaseStats, PokemonType, SpeciesStats};

    fn provider() -> StaticDataProvider {
        StaticDataProvider::default()
            .with_species(SpeciesStats {
                name: "eevee".to_string(),
                base_stats: BaseStats { hp: 55, attack: 55, defense: 50, speed: 55 },
                types: vec![PokemonType::Normal],
                learnable_moves: Vec::new(),
            })
            .with_species(SpeciesStats {
                name: "vulpix".to_string(),
                base_stats: BaseStats { hp: 38, attack: 41, defense: 40, speed: 65 },
                types: vec![PokemonType::Fire],
                learnable_moves: Vec::new(),
            })
    }

    #[test]
    fn test_roster_keeps_order_and_reports_failures() {
        let names = vec![
            "vulpix".to_string(),
            "agumon".to_string(),
            "Eevee".to_string(),
        ];

        let roster = build_roster(&provider(), &names, 25, &BattleRules::default());

        let loaded: Vec<_> = roster.combatants.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(loaded, vec!["vulpix", "eevee"]);
        assert_eq!(roster.combatants[0].max_health(), 38 + 25);
        assert_eq!(roster.failures.len(), 1);
        assert_eq!(roster.failures[0].name, "agumon");
        assert!(roster.failures[0].error.is_not_found());
    }

    #[test]
    fn test_heal_items_come_from_rules() {
        let rules = BattleRules {
            heal_items: 1,
            ..BattleRules::default()
        };
        let eevee = fetch_combatant(&provider(), "eevee", 10, &rules).unwrap();
        assert_eq!(eevee.heal_items(), 1);
    }
}
