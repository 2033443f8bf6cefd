//! Line-based terminal front-end.
//!
//! Translates typed commands into engine intents and narrates the events the
//! engine returns. All text lives here; the engine never formats anything.

use crate::battle::engine::BattleEngine;
use crate::battle::state::{BattleEvent, BattleState, EventBus, Outcome, Side};
use crate::battle::view::BattleView;
use crate::errors::BattleResult;
use crate::moves::title_case;
use std::io::{self, BufRead, Write};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    SelectCombatant(usize),
    Attack,
    UseHealItem,
    SelectMove(usize),
    Replay,
    Decline,
    Quit,
    Help,
}

/// Parses one line of input against what the current screen offers.
/// Numbers are 1-based. Returns `None` for anything unrecognised.
pub fn parse_intent(input: &str, view: &BattleView) -> Option<Intent> {
    let input = input.trim().to_lowercase();
    match input.as_str() {
        "" => return None,
        "q" | "quit" | "exit" => return Some(Intent::Quit),
        "h" | "help" | "?" => return Some(Intent::Help),
        _ => {}
    }

    match view.state {
        BattleState::SelectingCombatant => parse_choice(&input, view.roster.iter().map(|c| (&c.name, &c.display_name)))
            .map(Intent::SelectCombatant),
        BattleState::PlayerTurn => match input.as_str() {
            "1" | "a" | "attack" | "f" | "fight" => Some(Intent::Attack),
            "2" | "p" | "potion" | "heal" => Some(Intent::UseHealItem),
            _ => None,
        },
        BattleState::SelectingMove => {
            let moves = view.player()?.moves.iter().map(|m| (&m.name, &m.display_name));
            parse_choice(&input, moves).map(Intent::SelectMove)
        }
        BattleState::GameOver(_) => match input.as_str() {
            "y" | "yes" => Some(Intent::Replay),
            "n" | "no" => Some(Intent::Decline),
            _ => None,
        },
        _ => None,
    }
}

/// A 1-based number, or a name matching one of `options`.
fn parse_choice<'a>(
    input: &str,
    options: impl Iterator<Item = (&'a String, &'a String)>,
) -> Option<usize> {
    if let Ok(number) = input.parse::<usize>() {
        return number.checked_sub(1);
    }
    options
        .enumerate()
        .find(|(_, (name, display_name))| {
            name.eq_ignore_ascii_case(input) || display_name.eq_ignore_ascii_case(input)
        })
        .map(|(index, _)| index)
}

pub fn apply_intent(engine: &mut BattleEngine, intent: Intent) -> BattleResult<EventBus> {
    match intent {
        Intent::SelectCombatant(index) => engine.select_combatant(index),
        Intent::Attack => engine.choose_attack(),
        Intent::UseHealItem => engine.use_heal_item(),
        Intent::SelectMove(index) => engine.select_move(index),
        Intent::Replay => engine.replay(),
        Intent::Decline => engine.decline(),
        Intent::Quit => Ok(engine.quit()),
        Intent::Help => Ok(EventBus::new()),
    }
}

/// Narration for one event. Bookkeeping events have none.
pub fn describe_event(event: &BattleEvent) -> Option<String> {
    let line = match event {
        BattleEvent::RivalAppeared { rival } => format!("A wild {} appears!", title_case(rival)),
        BattleEvent::MovesAssigned {
            side: Side::Player,
            combatant,
            moves,
        } => format!(
            "{} knows {}.",
            title_case(combatant),
            moves.iter().map(|m| title_case(m)).collect::<Vec<_>>().join(", ")
        ),
        BattleEvent::MoveLookupFailed {
            combatant,
            move_ref,
            reason,
        } => format!(
            "Could not load move {} for {}: {}",
            move_ref,
            title_case(combatant),
            reason
        ),
        BattleEvent::NoUsableMoves { combatant, .. } => {
            format!("{} has no usable moves!", title_case(combatant))
        }
        BattleEvent::MoveUsed {
            attacker,
            move_name,
            ..
        } => format!("{} used {}!", title_case(attacker), title_case(move_name)),
        BattleEvent::CriticalHit { .. } => "A critical hit!".to_string(),
        BattleEvent::DamageDealt {
            target,
            damage,
            remaining_health,
            ..
        } => format!(
            "{} took {} damage ({} HP left).",
            title_case(target),
            damage,
            remaining_health
        ),
        BattleEvent::Fainted { combatant, .. } => format!("{} fainted!", title_case(combatant)),
        BattleEvent::Passed { combatant, .. } => {
            format!("{} has nothing to use and passes.", title_case(combatant))
        }
        BattleEvent::HealItemUsed {
            combatant,
            restored,
            new_health,
            items_left,
        } => format!(
            "You used a potion! {} recovered {} HP (now {}). Potions left: {}.",
            title_case(combatant),
            restored,
            new_health,
            items_left
        ),
        BattleEvent::NoHealItemsLeft { .. } => "You have no potions left!".to_string(),
        BattleEvent::BattleEnded {
            outcome: Outcome::PlayerWon,
            ..
        } => "You won the battle!".to_string(),
        BattleEvent::BattleEnded {
            outcome: Outcome::PlayerLost,
            ..
        } => "You lost the battle.".to_string(),
        BattleEvent::Terminated => "Goodbye!".to_string(),
        BattleEvent::MovesAssigned { .. }
        | BattleEvent::SameTypeBonus { .. }
        | BattleEvent::StateChanged { .. }
        | BattleEvent::RosterReset => return None,
    };
    Some(line)
}

/// The menu for the current screen; empty when no input is expected.
pub fn render_prompt(view: &BattleView) -> String {
    match view.state {
        BattleState::SelectingCombatant => {
            let mut prompt = String::from("Choose your Pokemon:\n");
            for (index, combatant) in view.roster.iter().enumerate() {
                prompt.push_str(&format!(
                    "  {}. {} (Lv. {}, {} HP)\n",
                    index + 1,
                    combatant.display_name,
                    combatant.level,
                    combatant.max_health
                ));
            }
            prompt
        }
        BattleState::PlayerTurn => {
            let mut prompt = String::new();
            if let (Some(player), Some(rival)) = (view.player(), view.rival()) {
                prompt.push_str(&format!(
                    "{} {}/{} HP  vs  {} {}/{} HP\n",
                    player.display_name,
                    player.current_health,
                    player.max_health,
                    rival.display_name,
                    rival.current_health,
                    rival.max_health
                ));
                prompt.push_str(&format!(
                    "  1. Attack\n  2. Potion ({} left)\n",
                    player.heal_items
                ));
            }
            prompt
        }
        BattleState::SelectingMove => {
            let mut prompt = String::from("Choose a move:\n");
            if let Some(player) = view.player() {
                for (index, move_) in player.moves.iter().enumerate() {
                    prompt.push_str(&format!(
                        "  {}. {} ({}, {} power)\n",
                        index + 1,
                        move_.display_name,
                        move_.move_type,
                        move_.power
                    ));
                }
            }
            prompt
        }
        BattleState::GameOver(_) => "Game Over! Play again? (y/n)\n".to_string(),
        _ => String::new(),
    }
}

const HELP: &str = "Commands: a number from the menu, a Pokemon or move name, \
attack, potion, y/n after a battle, quit.";

/// Drives `engine` from `input` until the session terminates or input ends.
/// End of input counts as quitting.
pub fn run_session<R: BufRead, W: Write>(
    engine: &mut BattleEngine,
    mut input: R,
    output: &mut W,
    pace: Duration,
) -> io::Result<()> {
    let mut line = String::new();
    loop {
        match engine.run_until_input() {
            Ok(bus) => narrate(&bus, output, pace)?,
            Err(err) => writeln!(output, "{}", err)?,
        }
        if !engine.state().awaits_input() {
            break;
        }

        write!(output, "{}> ", render_prompt(&engine.snapshot()))?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            let bus = engine.quit();
            writeln!(output)?;
            narrate(&bus, output, pace)?;
            break;
        }

        let Some(intent) = parse_intent(&line, &engine.snapshot()) else {
            writeln!(output, "Unrecognised command. Type 'help' for options.")?;
            continue;
        };
        if intent == Intent::Help {
            writeln!(output, "{}", HELP)?;
            continue;
        }
        match apply_intent(engine, intent) {
            Ok(bus) => narrate(&bus, output, pace)?,
            Err(err) => writeln!(output, "{}", err)?,
        }
    }
    Ok(())
}

fn narrate<W: Write>(bus: &EventBus, output: &mut W, pace: Duration) -> io::Result<()> {
    for line in bus.events().iter().filter_map(describe_event) {
        writeln!(output, "{}", line)?;
        output.flush()?;
        if !pace.is_zero() {
            std::thread::sleep(pace);
        }
    }
    Ok(())
}
