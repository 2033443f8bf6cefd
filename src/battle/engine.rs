use crate::battle::ai::{MovePolicy, RandomPolicy};
use crate::battle::calculators::{resolve_attack, AttackOutcome};
use crate::battle::state::{BattleEvent, BattleRng, BattleState, EventBus, Outcome, Side};
use crate::battle::view::{BattleView, CombatantView};
use crate::combatant::Combatant;
use crate::config::BattleRules;
use crate::errors::{BattleError, BattleResult};
use crate::learnset::select_moves;
use crate::provider::DataProvider;
use std::fmt;

/// The duel state machine.
///
/// Front-ends drive it with intents (`select_combatant`, `choose_attack`,
/// `use_heal_item`, `select_move`, `replay`, `decline`, `quit`) and step the
/// automatic states with `advance` or `run_until_input`. Every call returns
/// the events it produced. An intent the current state does not accept
/// returns [`BattleError::InvalidTransition`] and changes nothing.
pub struct BattleEngine {
    roster: Vec<Combatant>,
    state: BattleState,
    player: Option<usize>,
    rival: Option<usize>,
    rules: BattleRules,
    rng: BattleRng,
    policy: Box<dyn MovePolicy>,
    provider: Box<dyn DataProvider>,
}

impl fmt::Debug for BattleEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BattleEngine")
            .field("state", &self.state)
            .field("player", &self.player)
            .field("rival", &self.rival)
            .field("roster", &self.roster)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl BattleEngine {
    /// Creates an engine in `SelectingCombatant` with default rules, an
    /// OS-seeded RNG and a random rival.
    pub fn new(roster: Vec<Combatant>, provider: Box<dyn DataProvider>) -> BattleResult<Self> {
        if roster.len() < 2 {
            return Err(BattleError::RosterTooSmall(roster.len()));
        }
        Ok(Self {
            roster,
            state: BattleState::SelectingCombatant,
            player: None,
            rival: None,
            rules: BattleRules::default(),
            rng: BattleRng::new_random(),
            policy: Box::new(RandomPolicy),
            provider,
        })
    }

    /// Replaces the rules. Every combatant's heal-item stock, including what
    /// `replay` restores, is set to `rules.heal_items`.
    pub fn with_rules(mut self, rules: BattleRules) -> Self {
        self.roster = self
            .roster
            .into_iter()
            .map(|combatant| combatant.with_heal_items(rules.heal_items))
            .collect();
        self.rules = rules;
        self
    }

    pub fn with_rng(mut self, rng: BattleRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn with_policy(mut self, policy: Box<dyn MovePolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn state(&self) -> BattleState {
        self.state
    }

    pub fn roster(&self) -> &[Combatant] {
        &self.roster
    }

    pub fn rules(&self) -> &BattleRules {
        &self.rules
    }

    pub fn player(&self) -> Option<&Combatant> {
        self.player.and_then(|index| self.roster.get(index))
    }

    pub fn rival(&self) -> Option<&Combatant> {
        self.rival.and_then(|index| self.roster.get(index))
    }

    pub fn snapshot(&self) -> BattleView {
        BattleView {
            state: self.state,
            roster: self.roster.iter().map(CombatantView::from).collect(),
            player_index: self.player,
            rival_index: self.rival,
        }
    }

    // --- Intents ---

    /// Picks the player's combatant and runs the pre-battle setup: a random
    /// rival is drawn from the rest of the roster and both sides get fresh
    /// move sets. Leaves the engine in `PreBattle`.
    pub fn select_combatant(&mut self, index: usize) -> BattleResult<EventBus> {
        self.expect(self.state == BattleState::SelectingCombatant, "select a combatant")?;
        if index >= self.roster.len() {
            return Err(BattleError::InvalidRosterIndex(index));
        }

        let candidates: Vec<usize> = (0..self.roster.len()).filter(|&i| i != index).collect();
        let pick = self
            .rng
            .pick_index(candidates.len(), "rival selection")
            .ok_or(BattleError::RosterTooSmall(self.roster.len()))?;
        let rival = candidates[pick];

        let mut bus = EventBus::new();
        self.player = Some(index);
        self.rival = Some(rival);
        self.transition(BattleState::PreBattle, &mut bus);

        tracing::info!(
            player = %self.roster[index].name,
            rival = %self.roster[rival].name,
            "battle starting"
        );
        bus.push(BattleEvent::RivalAppeared {
            rival: self.roster[rival].name.clone(),
        });
        self.assign_moves(index, Side::Player, &mut bus);
        self.assign_moves(rival, Side::Rival, &mut bus);
        Ok(bus)
    }

    /// Opens move selection. A player without usable moves passes the turn instead.
    pub fn choose_attack(&mut self) -> BattleResult<EventBus> {
        self.expect(self.state == BattleState::PlayerTurn, "choose to attack")?;
        let (player, _) = self.participants("choose to attack")?;

        let mut bus = EventBus::new();
        if self.roster[player].available_moves().is_empty() {
            bus.push(BattleEvent::Passed {
                side: Side::Player,
                combatant: self.roster[player].name.clone(),
            });
            self.transition(BattleState::ResolvingEnd, &mut bus);
        } else {
            self.transition(BattleState::SelectingMove, &mut bus);
        }
        Ok(bus)
    }

    /// Spends a heal item on the player's combatant. The turn does not pass.
    /// With no items left nothing changes and `NoHealItemsLeft` is reported.
    pub fn use_heal_item(&mut self) -> BattleResult<EventBus> {
        self.expect(self.state == BattleState::PlayerTurn, "use a heal item")?;
        let (player, _) = self.participants("use a heal item")?;

        let mut bus = EventBus::new();
        let heal_amount = self.rules.heal_amount;
        let combatant = &mut self.roster[player];
        match combatant.use_heal_item(heal_amount) {
            Some(restored) => {
                tracing::debug!(name = %combatant.name, restored, "heal item used");
                bus.push(BattleEvent::HealItemUsed {
                    combatant: combatant.name.clone(),
                    restored,
                    new_health: combatant.current_health(),
                    items_left: combatant.heal_items(),
                });
            }
            None => bus.push(BattleEvent::NoHealItemsLeft {
                combatant: combatant.name.clone(),
            }),
        }
        Ok(bus)
    }

    /// The player attacks the rival with move `index`.
    pub fn select_move(&mut self, index: usize) -> BattleResult<EventBus> {
        self.expect(self.state == BattleState::SelectingMove, "select a move")?;

        let mut bus = EventBus::new();
        self.attack(Side::Player, index, &mut bus)?;
        self.transition(BattleState::ResolvingEnd, &mut bus);
        Ok(bus)
    }

    /// Resets every combatant and returns to combatant selection.
    pub fn replay(&mut self) -> BattleResult<EventBus> {
        self.expect(matches!(self.state, BattleState::GameOver(_)), "replay")?;

        let mut bus = EventBus::new();
        for combatant in &mut self.roster {
            combatant.reset();
        }
        self.player = None;
        self.rival = None;
        bus.push(BattleEvent::RosterReset);
        self.transition(BattleState::SelectingCombatant, &mut bus);
        Ok(bus)
    }

    pub fn decline(&mut self) -> BattleResult<EventBus> {
        self.expect(matches!(self.state, BattleState::GameOver(_)), "decline a replay")?;

        let mut bus = EventBus::new();
        self.terminate(&mut bus);
        Ok(bus)
    }

    /// Ends the session from any state. Quitting twice is a no-op.
    pub fn quit(&mut self) -> EventBus {
        let mut bus = EventBus::new();
        if !self.state.is_terminated() {
            self.terminate(&mut bus);
        }
        bus
    }

    // --- Automatic states ---

    /// Performs one automatic transition out of `PreBattle`, `ResolvingEnd`
    /// or `RivalTurn`.
    pub fn advance(&mut self) -> BattleResult<EventBus> {
        let mut bus = EventBus::new();
        match self.state {
            BattleState::PreBattle => {
                self.transition(BattleState::PlayerTurn, &mut bus);
            }
            BattleState::ResolvingEnd => {
                let (_, rival) = self.participants("resolve the turn")?;
                if self.roster[rival].is_fainted() {
                    self.finish(Outcome::PlayerWon, &mut bus)?;
                } else {
                    self.transition(BattleState::RivalTurn, &mut bus);
                }
            }
            BattleState::RivalTurn => self.rival_turn(&mut bus)?,
            _ => return Err(self.reject("advance")),
        }
        Ok(bus)
    }

    /// Advances until the engine needs an intent (or has terminated).
    pub fn run_until_input(&mut self) -> BattleResult<EventBus> {
        let mut bus = EventBus::new();
        while self.state.is_automatic() {
            bus.extend(self.advance()?);
        }
        Ok(bus)
    }

    // --- Internals ---

    fn rival_turn(&mut self, bus: &mut EventBus) -> BattleResult<()> {
        let (player, rival) = self.participants("take the rival turn")?;
        let choice = self
            .policy
            .choose_move(&self.roster[rival], &self.roster[player], &mut self.rng);

        match choice {
            Some(index) => {
                self.attack(Side::Rival, index, bus)?;
                if self.roster[player].is_fainted() {
                    return self.finish(Outcome::PlayerLost, bus);
                }
            }
            None => {
                tracing::debug!(rival = %self.roster[rival].name, "rival has no moves, passing");
                bus.push(BattleEvent::Passed {
                    side: Side::Rival,
                    combatant: self.roster[rival].name.clone(),
                });
            }
        }
        self.transition(BattleState::PlayerTurn, bus);
        Ok(())
    }

    fn attack(
        &mut self,
        side: Side,
        move_index: usize,
        bus: &mut EventBus,
    ) -> BattleResult<AttackOutcome> {
        let (player, rival) = self.participants("attack")?;
        let (attacker_index, defender_index) = match side {
            Side::Player => (player, rival),
            Side::Rival => (rival, player),
        };
        let move_used = self.roster[attacker_index]
            .available_moves()
            .get(move_index)
            .cloned()
            .ok_or(BattleError::InvalidMoveIndex(move_index))?;

        let (attacker, defender) = pair_mut(&mut self.roster, attacker_index, defender_index);
        let outcome = resolve_attack(attacker, defender, &move_used, &self.rules, &mut self.rng)?;

        bus.push(BattleEvent::MoveUsed {
            side,
            attacker: attacker.name.clone(),
            move_name: move_used.name().to_string(),
        });
        if outcome.same_type_bonus {
            bus.push(BattleEvent::SameTypeBonus {
                attacker: attacker.name.clone(),
            });
        }
        if outcome.critical {
            bus.push(BattleEvent::CriticalHit {
                attacker: attacker.name.clone(),
            });
        }
        bus.push(BattleEvent::DamageDealt {
            side: side.opponent(),
            target: defender.name.clone(),
            damage: outcome.damage,
            remaining_health: outcome.remaining_health,
        });
        if outcome.defender_fainted {
            bus.push(BattleEvent::Fainted {
                side: side.opponent(),
                combatant: defender.name.clone(),
            });
        }
        Ok(outcome)
    }

    fn assign_moves(&mut self, index: usize, side: Side, bus: &mut EventBus) {
        let combatant = &self.roster[index];
        let name = combatant.name.clone();
        let selection = select_moves(
            combatant.learnset(),
            combatant.level,
            self.rules.max_moves,
            self.provider.as_ref(),
            &mut self.rng,
        );

        for failure in selection.failures {
            bus.push(BattleEvent::MoveLookupFailed {
                combatant: name.clone(),
                move_ref: failure.move_ref,
                reason: failure.reason,
            });
        }
        if selection.moves.is_empty() {
            tracing::warn!(name = %name, "no usable moves");
            bus.push(BattleEvent::NoUsableMoves {
                side,
                combatant: name.clone(),
            });
        } else {
            bus.push(BattleEvent::MovesAssigned {
                side,
                combatant: name.clone(),
                moves: selection.moves.iter().map(|m| m.name().to_string()).collect(),
            });
        }
        self.roster[index].set_available_moves(selection.moves);
    }

    fn finish(&mut self, outcome: Outcome, bus: &mut EventBus) -> BattleResult<()> {
        let (player, rival) = self.participants("end the battle")?;
        let (winner, loser) = match outcome {
            Outcome::PlayerWon => (player, rival),
            Outcome::PlayerLost => (rival, player),
        };
        let winner = self.roster[winner].name.clone();
        let loser = self.roster[loser].name.clone();
        tracing::info!(?outcome, winner = %winner, loser = %loser, "battle over");

        bus.push(BattleEvent::BattleEnded {
            outcome,
            winner,
            loser,
        });
        self.transition(BattleState::GameOver(outcome), bus);
        Ok(())
    }

    fn terminate(&mut self, bus: &mut EventBus) {
        tracing::info!(from = %self.state, "session terminated");
        self.transition(BattleState::Terminated, bus);
        bus.push(BattleEvent::Terminated);
    }

    fn transition(&mut self, to: BattleState, bus: &mut EventBus) {
        let from = self.state;
        self.state = to;
        tracing::debug!(%from, %to, "state transition");
        bus.push(BattleEvent::StateChanged { from, to });
    }

    fn participants(&self, action: &'static str) -> BattleResult<(usize, usize)> {
        match (self.player, self.rival) {
            (Some(player), Some(rival)) => Ok((player, rival)),
            _ => Err(self.reject(action)),
        }
    }

    fn expect(&self, accepted: bool, action: &'static str) -> BattleResult<()> {
        if accepted {
            Ok(())
        } else {
            Err(self.reject(action))
        }
    }

    fn reject(&self, action: &'static str) -> BattleError {
        tracing::debug!(state = %self.state, action, "intent rejected");
        BattleError::InvalidTransition {
            state: self.state,
            action,
        }
    }
}

/// Mutable access to two distinct roster slots, returned in argument order.
fn pair_mut(roster: &mut [Combatant], first: usize, second: usize) -> (&mut Combatant, &mut Combatant) {
    assert_ne!(first, second, "a combatant cannot fight itself");
    if first < second {
        let (head, tail) = roster.split_at_mut(second);
        (&mut head[first], &mut tail[0])
    } else {
        let (head, tail) = roster.split_at_mut(first);
        (&mut tail[0], &mut head[second])
    }
}
