//! duel_core - Combat engine for turn-based text duels
//!
//! This library provides:
//! - Character: Stats, stat generation and point allocation
//! - Action: Attack / defend / search / weaken resolution
//! - ActionPolicy: How AI characters pick their commands
//! - GameSession: The turn loop for all three game modes and its report
//! - Dice: Injectable randomness so every outcome can be scripted in tests

pub mod action;
pub mod character;
pub mod config;
pub mod dice;
pub mod policy;
pub mod prelude;
pub mod session;

// Re-export core types for convenience
pub use action::{Action, ActionOutcome, Cheat, OutcomeKind, SearchFind, UnknownAction};
pub use character::{
    AllocationError, BaseStats, Character, CharacterKind, PlayerPreset, PointBuy, StatAllocation,
    StatGenerator, StatSnapshot,
};
pub use config::{default_game_constants, ConfigError, GameConstants};
pub use dice::{Dice, ScriptedDice};
pub use policy::{ActionPolicy, RandomPolicy, ScriptedPolicy};
pub use session::{
    CombatSession, Combatant, CommandInput, GameContext, GameMode, GameReport, GameSession,
    Persistence, Prompt, SessionState, Side, TurnRecord,
};
