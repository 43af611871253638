//! Sessions - Turn loop, termination rules and end-of-game reporting
//!
//! A [`CombatSession`] plays turns between two [`Combatant`]s: the first side
//! acts, then the second side acts against the already-updated first side,
//! then deaths are evaluated. [`GameSession`] wraps it with the counters of
//! one game and produces the [`GameReport`].

mod context;
mod game;
mod input;
mod report;

pub use context::GameContext;
pub use game::{GameMode, GameSession};
pub use input::{CommandInput, Prompt, ScriptedInput};
pub use report::GameReport;

use crate::action::{self, Action, ActionOutcome, Cheat};
use crate::character::{Character, StatSnapshot};
use crate::config::{EnemyConstants, RuleConstants};
use crate::dice::Dice;
use crate::policy::ActionPolicy;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

/// Which side of a duel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Acts first every turn
    First,
    Second,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }
}

/// How deaths are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persistence {
    /// First side persistent, second side replaced by a fresh AI when slain
    Asymmetric,
    /// Any death ends the session
    Symmetric,
}

/// Where the session stands after the last turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "side")]
pub enum SessionState {
    Active,
    /// Asymmetric mode: the persistent side died
    PersistentSlain,
    /// Symmetric mode: exactly one side survived
    Won(Side),
    /// Symmetric mode: both sides died on the same turn
    Draw,
    /// Symmetric mode: the configured turn limit was reached with both sides alive
    TurnLimit,
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SessionState::Active)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Active => f.write_str("active"),
            SessionState::PersistentSlain => f.write_str("slain"),
            SessionState::Won(Side::First) => f.write_str("first side wins"),
            SessionState::Won(Side::Second) => f.write_str("second side wins"),
            SessionState::Draw => f.write_str("draw"),
            SessionState::TurnLimit => f.write_str("turn limit"),
        }
    }
}

/// Where a side's commands come from
pub enum Controller {
    /// Blocking human input; invalid commands are asked for again
    Human(Box<dyn CommandInput>),
    /// AI policy; invalid commands resolve as a no-op
    Ai(Box<dyn ActionPolicy>),
}

impl fmt::Debug for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Controller::Human(_) => f.write_str("Human"),
            Controller::Ai(_) => f.write_str("Ai"),
        }
    }
}

/// A character together with whatever decides its actions
#[derive(Debug)]
pub struct Combatant {
    pub character: Character,
    pub controller: Controller,
}

impl Combatant {
    pub fn human(character: Character, input: impl CommandInput + 'static) -> Self {
        Combatant {
            character,
            controller: Controller::Human(Box::new(input)),
        }
    }

    pub fn ai(character: Character, policy: impl ActionPolicy + 'static) -> Self {
        Combatant {
            character,
            controller: Controller::Ai(Box::new(policy)),
        }
    }

    pub fn is_human(&self) -> bool {
        matches!(self.controller, Controller::Human(_))
    }

    /// Ask the controller for a command and resolve it against `opponent`
    fn take_action(
        &mut self,
        opponent: &mut Character,
        turn: u32,
        previous: Option<&ActionOutcome>,
        rules: &RuleConstants,
        dice: &mut dyn Dice,
    ) -> ActionOutcome {
        match &mut self.controller {
            Controller::Ai(policy) => {
                let command = policy.select(&self.character, opponent, dice);
                action::dispatch(&mut self.character, opponent, &command, dice)
            }
            Controller::Human(input) => {
                let mut rejected: Option<String> = None;
                loop {
                    let prompt = Prompt {
                        turn,
                        actor: &self.character,
                        opponent: &*opponent,
                        previous,
                        rejected: rejected.as_deref(),
                    };
                    let command = input.read_command(&prompt);

                    if let Ok(action) = command.parse::<Action>() {
                        return action.resolve(&mut self.character, opponent, dice);
                    }
                    if rules.allow_cheats {
                        if let Some(cheat) = Cheat::parse(&command) {
                            return cheat.apply(&mut self.character);
                        }
                    }

                    warn!(
                        actor = self.character.name(),
                        command = %command,
                        "invalid action, asking again"
                    );
                    rejected = Some(command);
                }
            }
        }
    }
}

/// A disposable side that was slain and replaced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Respawn {
    pub slain: StatSnapshot,
    pub replacement: StatSnapshot,
}

/// Everything that happened in one turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub turn: u32,
    /// First side's stats before anyone acted
    pub first_before: StatSnapshot,
    /// Second side's stats before anyone acted
    pub second_before: StatSnapshot,
    pub first_outcome: ActionOutcome,
    pub second_outcome: ActionOutcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub respawn: Option<Respawn>,
    /// State after the turn was evaluated
    pub state: SessionState,
}

/// Two combatants fighting turn by turn until a terminal state
#[derive(Debug)]
pub struct CombatSession {
    first: Combatant,
    second: Combatant,
    persistence: Persistence,
    state: SessionState,
    rules: RuleConstants,
    enemy: EnemyConstants,
}

impl CombatSession {
    pub fn new(
        first: Combatant,
        second: Combatant,
        persistence: Persistence,
        rules: RuleConstants,
        enemy: EnemyConstants,
    ) -> Self {
        CombatSession {
            first,
            second,
            persistence,
            state: SessionState::Active,
            rules,
            enemy,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn persistence(&self) -> Persistence {
        self.persistence
    }

    pub fn first(&self) -> &Character {
        &self.first.character
    }

    pub fn second(&self) -> &Character {
        &self.second.character
    }

    pub fn character(&self, side: Side) -> &Character {
        match side {
            Side::First => self.first(),
            Side::Second => self.second(),
        }
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::First => &self.first,
            Side::Second => &self.second,
        }
    }

    /// Play one turn: first side acts, second side acts, deaths are evaluated
    ///
    /// The second side acts even if the first side's action already brought
    /// it to zero health. Returns `None` without touching anything once the
    /// session has ended.
    pub fn play_turn(
        &mut self,
        context: &mut GameContext,
        dice: &mut dyn Dice,
    ) -> Option<TurnRecord> {
        if self.state.is_terminal() {
            return None;
        }

        context.turn += 1;
        let turn = context.turn;
        let first_before = self.first.character.snapshot();
        let second_before = self.second.character.snapshot();

        let first_outcome =
            self.first
                .take_action(&mut self.second.character, turn, None, &self.rules, dice);
        let second_outcome = self.second.take_action(
            &mut self.first.character,
            turn,
            Some(&first_outcome),
            &self.rules,
            dice,
        );
        debug!(turn, first = %first_outcome, second = %second_outcome, "turn resolved");

        let respawn = self.evaluate(context, dice);

        Some(TurnRecord {
            turn,
            first_before,
            second_before,
            first_outcome,
            second_outcome,
            respawn,
            state: self.state,
        })
    }

    /// Update the state from both sides' health, replacing a slain disposable side
    fn evaluate(&mut self, context: &mut GameContext, dice: &mut dyn Dice) -> Option<Respawn> {
        let first_alive = self.first.character.is_alive();
        let second_alive = self.second.character.is_alive();
        let mut respawn = None;

        self.state = match self.persistence {
            Persistence::Asymmetric if !first_alive => {
                info!(
                    fallen = self.first.character.name(),
                    slain_by = self.second.character.name(),
                    turn = context.turn,
                    "persistent side slain"
                );
                SessionState::PersistentSlain
            }
            Persistence::Asymmetric if !second_alive => {
                let replacement = context.spawn_enemy(&self.enemy, dice);
                let slain = std::mem::replace(&mut self.second.character, replacement);
                info!(
                    slain = slain.name(),
                    by = self.first.character.name(),
                    replacement = self.second.character.name(),
                    "enemy slain, next one steps in"
                );
                respawn = Some(Respawn {
                    slain: slain.snapshot(),
                    replacement: self.second.character.snapshot(),
                });
                SessionState::Active
            }
            Persistence::Asymmetric => SessionState::Active,
            Persistence::Symmetric => match (first_alive, second_alive) {
                (true, true) => SessionState::Active,
                (true, false) => SessionState::Won(Side::First),
                (false, true) => SessionState::Won(Side::Second),
                (false, false) => SessionState::Draw,
            },
        };

        if self.state == SessionState::Active
            && self.persistence == Persistence::Symmetric
            && self.rules.max_turns > 0
            && context.turn >= self.rules.max_turns
        {
            self.state = SessionState::TurnLimit;
        }

        if self.state.is_terminal() {
            info!(turn = context.turn, state = %self.state, "session ended");
        }

        respawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{BaseStats, CharacterKind};
    use crate::dice::ScriptedDice;
    use crate::policy::ScriptedPolicy;

    fn ai(name: &str, health: i32, attack: i32) -> Character {
        Character::new(
            name,
            CharacterKind::Ai { level: 1 },
            BaseStats {
                base_health: health,
                attack,
                defense: 0,
                search: 0,
                toughness: 0,
            },
            2,
        )
    }

    fn symmetric(first: Combatant, second: Combatant) -> CombatSession {
        CombatSession::new(
            first,
            second,
            Persistence::Symmetric,
            RuleConstants::default(),
            EnemyConstants::default(),
        )
    }

    #[test]
    fn test_first_side_acts_before_second() {
        let mut session = symmetric(
            Combatant::ai(ai("One", 20, 5), ScriptedPolicy::new(["attack"])),
            Combatant::ai(ai("Two", 20, 5), ScriptedPolicy::new(["weaken"])),
        );
        let mut context = GameContext::new();
        let mut dice = ScriptedDice::default();

        let record = session.play_turn(&mut context, &mut dice).unwrap();

        assert_eq!(record.turn, 1);
        assert_eq!(record.first_before.current_health, 20);
        assert_eq!(record.first_outcome.to_string(), "One attacks! (5 damage dealt)");
        assert_eq!(
            record.second_outcome.to_string(),
            "Two weakens One (-1 to enemy Defense, Search, and Health)"
        );
        assert_eq!(session.first().current_health(), 19);
        assert_eq!(session.second().current_health(), 15);
        assert_eq!(record.state, SessionState::Active);
        assert_eq!(context.turn, 1);
    }

    #[test]
    fn test_dead_second_side_still_acts() {
        let mut session = symmetric(
            Combatant::ai(ai("One", 3, 10), ScriptedPolicy::new(["attack"])),
            Combatant::ai(ai("Two", 3, 10), ScriptedPolicy::new(["attack"])),
        );
        let mut context = GameContext::new();
        let mut dice = ScriptedDice::default();

        let record = session.play_turn(&mut context, &mut dice).unwrap();

        assert_eq!(record.state, SessionState::Draw);
        assert!(!session.first().is_alive());
        assert!(!session.second().is_alive());
    }

    #[test]
    fn test_terminated_session_is_frozen() {
        let mut session = symmetric(
            Combatant::ai(ai("One", 30, 50), ScriptedPolicy::new(["attack"])),
            Combatant::ai(ai("Two", 3, 1), ScriptedPolicy::new(["defend"])),
        );
        let mut context = GameContext::new();
        let mut dice = ScriptedDice::default();

        let record = session.play_turn(&mut context, &mut dice).unwrap();
        assert_eq!(record.state, SessionState::Won(Side::First));

        assert!(session.play_turn(&mut context, &mut dice).is_none());
        assert_eq!(context.turn, 1);
    }

    #[test]
    fn test_human_is_asked_again_on_invalid_command() {
        let mut session = symmetric(
            Combatant::human(ai("One", 30, 4), ScriptedInput::new(["dance", "highground", "a"])),
            Combatant::ai(ai("Two", 30, 4), ScriptedPolicy::new(["defend"])),
        );
        let mut context = GameContext::new();
        let mut dice = ScriptedDice::default();

        let record = session.play_turn(&mut context, &mut dice).unwrap();

        assert_eq!(record.first_outcome.to_string(), "One attacks! (4 damage dealt)");
        assert_eq!(session.first().attack(), 4);
    }

    #[test]
    fn test_human_prompt_carries_rejected_command() {
        let mut answers = vec!["x".to_string(), "d".to_string()].into_iter();
        let input = move |prompt: &Prompt<'_>| {
            assert!(prompt.previous.is_some());
            if prompt.rejected.is_some() {
                assert_eq!(prompt.rejected, Some("x"));
            }
            answers.next().unwrap()
        };
        let mut session = symmetric(
            Combatant::ai(ai("One", 30, 4), ScriptedPolicy::new(["search"])),
            Combatant::human(ai("Two", 30, 4), input),
        );
        let mut context = GameContext::new();
        let mut dice = ScriptedDice::new([70]);

        let record = session.play_turn(&mut context, &mut dice).unwrap();

        assert_eq!(record.second_outcome.to_string(), "Two defends! (+2 defense)");
        assert_eq!(session.first().attack(), 5);
    }

    #[test]
    fn test_cheats_when_allowed() {
        let rules = RuleConstants {
            allow_cheats: true,
            max_turns: 0,
        };
        let mut session = CombatSession::new(
            Combatant::human(ai("One", 30, 4), ScriptedInput::new(["death"])),
            Combatant::ai(ai("Two", 30, 4), ScriptedPolicy::new(["defend"])),
            Persistence::Symmetric,
            rules,
            EnemyConstants::default(),
        );
        let mut context = GameContext::new();
        let mut dice = ScriptedDice::default();

        let record = session.play_turn(&mut context, &mut dice).unwrap();

        assert_eq!(record.first_outcome.to_string(), "One has fallen!");
        assert_eq!(record.state, SessionState::Won(Side::Second));
    }

    #[test]
    fn test_turn_limit() {
        let rules = RuleConstants {
            allow_cheats: false,
            max_turns: 2,
        };
        let mut session = CombatSession::new(
            Combatant::ai(ai("One", 30, 4), ScriptedPolicy::new(Vec::<String>::new())),
            Combatant::ai(ai("Two", 30, 4), ScriptedPolicy::new(Vec::<String>::new())),
            Persistence::Symmetric,
            rules,
            EnemyConstants::default(),
        );
        let mut context = GameContext::new();
        let mut dice = ScriptedDice::default();

        assert_eq!(
            session.play_turn(&mut context, &mut dice).unwrap().state,
            SessionState::Active
        );
        assert_eq!(
            session.play_turn(&mut context, &mut dice).unwrap().state,
            SessionState::TurnLimit
        );
    }

    #[test]
    fn test_turn_limit_ignored_when_enemies_respawn() {
        let rules = RuleConstants {
            allow_cheats: false,
            max_turns: 1,
        };
        let mut session = CombatSession::new(
            Combatant::human(ai("Hero", 30, 4), ScriptedInput::new(["defend", "defend"])),
            Combatant::ai(ai("Robot", 30, 4), ScriptedPolicy::new(["defend", "defend"])),
            Persistence::Asymmetric,
            rules,
            EnemyConstants::default(),
        );
        let mut context = GameContext::new();
        let mut dice = ScriptedDice::default();

        let record = session.play_turn(&mut context, &mut dice).unwrap();
        assert_eq!(record.state, SessionState::Active);
        assert!(session.first().is_alive());

        let record = session.play_turn(&mut context, &mut dice).unwrap();
        assert_eq!(record.turn, 2);
        assert_eq!(record.state, SessionState::Active);
    }

    #[test]
    fn test_side_other() {
        assert_eq!(Side::First.other(), Side::Second);
        assert_eq!(Side::Second.other(), Side::First);
    }
}
