//! ActionOutcome - What one action did, with its report line

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of resolving one action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    /// Name of the acting character
    pub actor: String,
    pub kind: OutcomeKind,
}

/// What happened, with the numbers behind the report line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "action")]
pub enum OutcomeKind {
    Attack { target: String, damage: i32 },
    Defend { gained: i32 },
    Search { find: SearchFind },
    Weaken { target: String, amount: i32 },
    /// Unrecognized AI command, nothing changed
    Invalid { command: String },
    Highground { amount: i32 },
    Fallen,
}

/// The five search results, selected by a percentile roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "find")]
pub enum SearchFind {
    /// +bonus attack, defense, search and +3x bonus health
    Jackpot { bonus: i32 },
    /// +bonus search
    MagnifyingGlass { bonus: i32 },
    /// +1 weaken modifier
    Poison,
    /// +health (3x bonus)
    HealingPotion { health: i32 },
    /// +bonus attack
    Weapon { bonus: i32 },
}

impl ActionOutcome {
    pub fn new(actor: impl Into<String>, kind: OutcomeKind) -> Self {
        ActionOutcome {
            actor: actor.into(),
            kind,
        }
    }

    /// Whether this outcome is the invalid-command no-op
    pub fn is_invalid(&self) -> bool {
        matches!(self.kind, OutcomeKind::Invalid { .. })
    }

    /// Damage dealt to the target's health, if any
    pub fn damage_dealt(&self) -> Option<i32> {
        match self.kind {
            OutcomeKind::Attack { damage, .. } => Some(damage),
            OutcomeKind::Weaken { amount, .. } => Some(amount),
            _ => None,
        }
    }
}

impl fmt::Display for ActionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let actor = &self.actor;
        match &self.kind {
            OutcomeKind::Attack { damage, .. } => {
                write!(f, "{actor} attacks! ({damage} damage dealt)")
            }
            OutcomeKind::Defend { gained } => write!(f, "{actor} defends! (+{gained} defense)"),
            OutcomeKind::Search { find } => match find {
                SearchFind::Jackpot { bonus } => write!(
                    f,
                    "{actor} found the jackpot! (+{bonus} to all stats, +{} health)",
                    bonus * 3
                ),
                SearchFind::MagnifyingGlass { bonus } => {
                    write!(f, "{actor} found a better magnifying glass! (+{bonus} search)")
                }
                SearchFind::Poison => write!(f, "{actor} found some poison! (+1 to weakens)"),
                SearchFind::HealingPotion { health } => {
                    write!(f, "{actor} found a healing potion! (+{health} health)")
                }
                SearchFind::Weapon { bonus } => {
                    write!(f, "{actor} found new weapon! (+{bonus} attack)")
                }
            },
            OutcomeKind::Weaken { target, amount } => write!(
                f,
                "{actor} weakens {target} (-{amount} to enemy Defense, Search, and Health)"
            ),
            OutcomeKind::Invalid { .. } => write!(f, "{actor} hesitates (Invalid Action)"),
            OutcomeKind::Highground { amount } => {
                write!(f, "{actor} has the highground! All Stats +{amount}")
            }
            OutcomeKind::Fallen => write!(f, "{actor} has fallen!"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_lines() {
        let line = |find| ActionOutcome::new("Ana", OutcomeKind::Search { find }).to_string();
        assert_eq!(
            line(SearchFind::Jackpot { bonus: 2 }),
            "Ana found the jackpot! (+2 to all stats, +6 health)"
        );
        assert_eq!(
            line(SearchFind::MagnifyingGlass { bonus: 3 }),
            "Ana found a better magnifying glass! (+3 search)"
        );
        assert_eq!(line(SearchFind::Poison), "Ana found some poison! (+1 to weakens)");
        assert_eq!(
            line(SearchFind::HealingPotion { health: 9 }),
            "Ana found a healing potion! (+9 health)"
        );
        assert_eq!(line(SearchFind::Weapon { bonus: 1 }), "Ana found new weapon! (+1 attack)");
    }

    #[test]
    fn test_weaken_line() {
        let outcome = ActionOutcome::new(
            "Ana",
            OutcomeKind::Weaken {
                target: "Bob".to_string(),
                amount: 2,
            },
        );
        assert_eq!(
            outcome.to_string(),
            "Ana weakens Bob (-2 to enemy Defense, Search, and Health)"
        );
        assert_eq!(outcome.damage_dealt(), Some(2));
    }

    #[test]
    fn test_non_damaging_outcomes() {
        let defend = ActionOutcome::new("Ana", OutcomeKind::Defend { gained: 2 });
        assert_eq!(defend.to_string(), "Ana defends! (+2 defense)");
        assert_eq!(defend.damage_dealt(), None);
        assert!(!defend.is_invalid());
    }
}
