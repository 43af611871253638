//! Actions - Command parsing and dispatch to the four action algorithms

mod outcome;
mod resolution;

pub use outcome::{ActionOutcome, OutcomeKind, SearchFind};
pub use resolution::{attack, defend, search, search_find, weaken};

use crate::character::Character;
use crate::dice::Dice;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

/// One of the four things a combatant can do on its turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Attack,
    Defend,
    Search,
    Weaken,
}

impl Action {
    /// Get all actions
    pub fn all() -> &'static [Action] {
        &[Action::Attack, Action::Defend, Action::Search, Action::Weaken]
    }

    /// Full command word
    pub fn name(&self) -> &'static str {
        match self {
            Action::Attack => "attack",
            Action::Defend => "defend",
            Action::Search => "search",
            Action::Weaken => "weaken",
        }
    }

    /// Single-letter shorthand
    pub fn shorthand(&self) -> char {
        match self {
            Action::Attack => 'a',
            Action::Defend => 'd',
            Action::Search => 's',
            Action::Weaken => 'w',
        }
    }

    /// Resolve this action for `actor` against `target`
    pub fn resolve(
        self,
        actor: &mut Character,
        target: &mut Character,
        dice: &mut dyn Dice,
    ) -> ActionOutcome {
        match self {
            Action::Attack => attack(actor, target),
            Action::Defend => defend(actor),
            Action::Search => search(actor, dice),
            Action::Weaken => weaken(actor, target),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A command that names none of the four actions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown action '{0}'")]
pub struct UnknownAction(pub String);

impl FromStr for Action {
    type Err = UnknownAction;

    /// Accepts the full word or its first letter, ignoring case and
    /// surrounding whitespace
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "a" | "attack" => Ok(Action::Attack),
            "d" | "defend" => Ok(Action::Defend),
            "s" | "search" => Ok(Action::Search),
            "w" | "weaken" => Ok(Action::Weaken),
            _ => Err(UnknownAction(s.to_string())),
        }
    }
}

/// Hidden commands accepted from human players when cheats are enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cheat {
    /// +100 to health, attack, defense and search
    Highground,
    /// Drop to 0 health
    Death,
}

impl Cheat {
    const HIGHGROUND_BONUS: i32 = 100;

    pub fn parse(command: &str) -> Option<Cheat> {
        match command.trim().to_lowercase().as_str() {
            "highground" => Some(Cheat::Highground),
            "death" => Some(Cheat::Death),
            _ => None,
        }
    }

    pub fn apply(self, actor: &mut Character) -> ActionOutcome {
        let kind = match self {
            Cheat::Highground => {
                let amount = Self::HIGHGROUND_BONUS;
                actor.increase_current_health(amount);
                actor.increase_attack(amount);
                actor.increase_defense(amount);
                actor.increase_search(amount);
                OutcomeKind::Highground { amount }
            }
            Cheat::Death => {
                actor.set_current_health(0);
                OutcomeKind::Fallen
            }
        };
        warn!(actor = actor.name(), cheat = ?self, "cheat command used");
        ActionOutcome::new(actor.name(), kind)
    }
}

/// Resolve a textual command from an AI policy
///
/// Unrecognized commands change nothing and report an invalid action.
pub fn dispatch(
    actor: &mut Character,
    target: &mut Character,
    command: &str,
    dice: &mut dyn Dice,
) -> ActionOutcome {
    match command.parse::<Action>() {
        Ok(action) => action.resolve(actor, target, dice),
        Err(err) => {
            warn!(actor = actor.name(), %err, "invalid action, no-op");
            ActionOutcome::new(
                actor.name(),
                OutcomeKind::Invalid {
                    command: command.to_string(),
                },
            )
        }
    }
}
