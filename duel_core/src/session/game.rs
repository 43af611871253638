//! GameSession - One game in one of the three modes

use super::context::GameContext;
use super::report::GameReport;
use super::{CombatSession, Combatant, CommandInput, Persistence, SessionState, Side, TurnRecord};
use crate::character::Character;
use crate::config::GameConstants;
use crate::dice::Dice;
use crate::policy::RandomPolicy;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// Who plays whom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// One player against an endless line of AI opponents
    PlayerVsAi,
    PlayerVsPlayer,
    AiVsAi,
}

impl GameMode {
    /// Get all game modes
    pub fn all() -> &'static [GameMode] {
        &[GameMode::PlayerVsAi, GameMode::PlayerVsPlayer, GameMode::AiVsAi]
    }

    pub fn name(&self) -> &'static str {
        match self {
            GameMode::PlayerVsAi => "Player vs AI",
            GameMode::PlayerVsPlayer => "Player vs Player",
            GameMode::AiVsAi => "AI vs AI",
        }
    }

    pub fn persistence(&self) -> Persistence {
        match self {
            GameMode::PlayerVsAi => Persistence::Asymmetric,
            GameMode::PlayerVsPlayer | GameMode::AiVsAi => Persistence::Symmetric,
        }
    }

    /// Number of human players this mode needs
    pub fn human_players(&self) -> usize {
        match self {
            GameMode::PlayerVsAi => 1,
            GameMode::PlayerVsPlayer => 2,
            GameMode::AiVsAi => 0,
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A combat session plus the counters and report of one game
#[derive(Debug)]
pub struct GameSession {
    mode: GameMode,
    context: GameContext,
    combat: CombatSession,
}

impl GameSession {
    /// Assemble a game from prepared combatants
    ///
    /// `context` must already count any AI characters created for them.
    pub fn new(
        mode: GameMode,
        first: Combatant,
        second: Combatant,
        context: GameContext,
        constants: &GameConstants,
    ) -> Self {
        let combat = CombatSession::new(
            first,
            second,
            mode.persistence(),
            constants.rules.clone(),
            constants.enemy.clone(),
        );
        info!(
            %mode,
            first = combat.first().name(),
            second = combat.second().name(),
            "game started"
        );
        GameSession {
            mode,
            context,
            combat,
        }
    }

    /// A player against random AI opponents, each replaced when slain
    pub fn player_vs_ai(
        player: Character,
        input: impl CommandInput + 'static,
        constants: &GameConstants,
        dice: &mut dyn Dice,
    ) -> Self {
        let mut context = GameContext::new();
        let enemy = context.spawn_enemy(&constants.enemy, dice);
        Self::new(
            GameMode::PlayerVsAi,
            Combatant::human(player, input),
            Combatant::ai(enemy, RandomPolicy),
            context,
            constants,
        )
    }

    /// Two players; the first one moves first every turn
    pub fn player_vs_player(
        first: Character,
        first_input: impl CommandInput + 'static,
        second: Character,
        second_input: impl CommandInput + 'static,
        constants: &GameConstants,
    ) -> Self {
        Self::new(
            GameMode::PlayerVsPlayer,
            Combatant::human(first, first_input),
            Combatant::human(second, second_input),
            GameContext::new(),
            constants,
        )
    }

    /// Two random AI characters
    pub fn ai_vs_ai(constants: &GameConstants, dice: &mut dyn Dice) -> Self {
        let mut context = GameContext::new();
        let first = context.spawn_enemy(&constants.enemy, dice);
        let second = context.spawn_enemy(&constants.enemy, dice);
        Self::new(
            GameMode::AiVsAi,
            Combatant::ai(first, RandomPolicy),
            Combatant::ai(second, RandomPolicy),
            context,
            constants,
        )
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn context(&self) -> &GameContext {
        &self.context
    }

    /// Turns played so far
    pub fn turn(&self) -> u32 {
        self.context.turn
    }

    pub fn state(&self) -> SessionState {
        self.combat.state()
    }

    pub fn is_over(&self) -> bool {
        self.combat.state().is_terminal()
    }

    pub fn character(&self, side: Side) -> &Character {
        self.combat.character(side)
    }

    pub fn combat(&self) -> &CombatSession {
        &self.combat
    }

    /// Play one turn; `None` once the game is over
    pub fn play_turn(&mut self, dice: &mut dyn Dice) -> Option<TurnRecord> {
        self.combat.play_turn(&mut self.context, dice)
    }

    /// Play until the game ends, handing every turn to `on_turn`
    pub fn run<F>(&mut self, dice: &mut dyn Dice, mut on_turn: F) -> GameReport
    where
        F: FnMut(&TurnRecord),
    {
        while let Some(record) = self.play_turn(dice) {
            on_turn(&record);
        }
        // the loop only exits on a terminal state
        self.build_report()
    }

    /// End-of-game report, `None` while the game is still running
    ///
    /// Building the report reads state only, so repeated calls agree.
    pub fn report(&self) -> Option<GameReport> {
        if self.is_over() {
            Some(self.build_report())
        } else {
            None
        }
    }

    fn build_report(&self) -> GameReport {
        GameReport::build(
            self.mode,
            self.combat.state(),
            &self.context,
            self.combat.first(),
            self.combat.second(),
        )
    }
}
