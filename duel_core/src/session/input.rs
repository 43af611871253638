//! Human input seam - Blocking command source for player-controlled sides

use crate::action::ActionOutcome;
use crate::character::Character;
use std::collections::VecDeque;

/// Everything a human needs to see before choosing a command
#[derive(Debug, Clone, Copy)]
pub struct Prompt<'a> {
    /// Number of the turn being played (first turn is 1)
    pub turn: u32,
    pub actor: &'a Character,
    pub opponent: &'a Character,
    /// Outcome of the action already taken this turn, if the actor moves second
    pub previous: Option<&'a ActionOutcome>,
    /// Last command rejected for this same decision, if any
    pub rejected: Option<&'a str>,
}

/// Blocking source of commands for a human-controlled side
///
/// Called once per decision; when the returned text is not a valid command
/// the session calls again with `rejected` set, until it gets one.
pub trait CommandInput {
    fn read_command(&mut self, prompt: &Prompt<'_>) -> String;
}

impl<F> CommandInput for F
where
    F: FnMut(&Prompt<'_>) -> String,
{
    fn read_command(&mut self, prompt: &Prompt<'_>) -> String {
        self(prompt)
    }
}

/// Replays typed commands in order
///
/// # Panics
///
/// Panics when asked for a command after the script is exhausted.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    commands: VecDeque<String>,
    prompts_seen: usize,
}

impl ScriptedInput {
    pub fn new<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedInput {
            commands: commands.into_iter().map(Into::into).collect(),
            prompts_seen: 0,
        }
    }

    /// How many times this input has been asked for a command
    pub fn prompts_seen(&self) -> usize {
        self.prompts_seen
    }
}

impl CommandInput for ScriptedInput {
    fn read_command(&mut self, prompt: &Prompt<'_>) -> String {
        self.prompts_seen += 1;
        self.commands.pop_front().unwrap_or_else(|| {
            panic!(
                "scripted input exhausted on turn {} for {}",
                prompt.turn,
                prompt.actor.name()
            )
        })
    }
}
