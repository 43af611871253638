//! GameReport - End-of-game summary

use super::context::GameContext;
use super::game::GameMode;
use super::{SessionState, Side};
use crate::character::{Character, StatSnapshot};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What the output side shows when a game ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameReport {
    pub mode: GameMode,
    pub state: SessionState,
    pub total_turns: u32,
    /// Only reported when one player faces a line of AI opponents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enemies_encountered: Option<u32>,
    /// Name of the surviving side, if exactly one survived
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
    /// Game-over lines naming who fell to whom
    pub headline: Vec<String>,
    /// Final stats: the player only against AI opponents, both sides otherwise
    pub finals: Vec<StatSnapshot>,
}

impl GameReport {
    pub(crate) fn build(
        mode: GameMode,
        state: SessionState,
        context: &GameContext,
        first: &Character,
        second: &Character,
    ) -> Self {
        let (one, two) = (first.name(), second.name());
        let (headline, winner) = match state {
            SessionState::PersistentSlain => (vec![format!("{one} was slain by {two}!")], None),
            SessionState::Won(Side::First) => (
                vec![format!("{two} was slain by {one}!"), format!("{one} WINS!")],
                Some(one.to_string()),
            ),
            SessionState::Won(Side::Second) => (
                vec![format!("{one} was slain by {two}!"), format!("{two} WINS!")],
                Some(two.to_string()),
            ),
            SessionState::Draw => (
                vec![
                    format!("{one} and {two} have both fallen!"),
                    format!("{one} and {two} DRAW!"),
                ],
                None,
            ),
            SessionState::TurnLimit => (
                vec![
                    format!("{one} and {two} are still standing after {} turns!", context.turn),
                    format!("{one} and {two} DRAW!"),
                ],
                None,
            ),
            SessionState::Active => (Vec::new(), None),
        };

        let (enemies_encountered, finals) = match mode {
            GameMode::PlayerVsAi => (Some(context.enemies_encountered), vec![first.snapshot()]),
            GameMode::PlayerVsPlayer | GameMode::AiVsAi => {
                (None, vec![first.snapshot(), second.snapshot()])
            }
        };

        GameReport {
            mode,
            state,
            total_turns: context.turn,
            enemies_encountered,
            winner,
            headline,
            finals,
        }
    }
}

impl fmt::Display for GameReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===================== [GAME OVER] =====================")?;
        for line in &self.headline {
            writeln!(f, "{line}")?;
        }
        writeln!(f, "Total turns: {}", self.total_turns)?;
        if let Some(enemies) = self.enemies_encountered {
            writeln!(f, "Enemies encountered: {enemies}")?;
        }
        writeln!(f)?;
        for snapshot in &self.finals {
            writeln!(f, "{snapshot}")?;
        }
        write!(f, "Thanks for playing!")
    }
}
