//! Prelude module for convenient imports
//!
//! ```rust
//! use duel_core::prelude::*;
//! ```

// Characters
pub use crate::character::{Character, CharacterKind, StatAllocation, StatSnapshot};

// Actions
pub use crate::action::{Action, ActionOutcome, OutcomeKind};

// Sessions
pub use crate::session::{
    CommandInput, GameMode, GameReport, GameSession, Prompt, SessionState, Side, TurnRecord,
};

// Randomness and AI
pub use crate::dice::Dice;
pub use crate::policy::{ActionPolicy, RandomPolicy};

// Config
pub use crate::config::{default_game_constants, GameConstants};
