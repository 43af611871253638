//! ActionPolicy - How AI-controlled combatants choose their command

use crate::action::Action;
use crate::character::Character;
use crate::dice::Dice;
use std::collections::VecDeque;

/// Strategy for picking an AI combatant's command each turn
///
/// Returns command text rather than an [`Action`] so a policy can emit
/// anything; the session resolves unrecognized text as a no-op.
pub trait ActionPolicy {
    fn select(&mut self, actor: &Character, opponent: &Character, dice: &mut dyn Dice) -> String;
}

/// Baseline policy: each action with 25% probability from one percentile roll
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPolicy;

impl RandomPolicy {
    /// Map a percentile roll to an action
    pub fn action_for_roll(roll: u32) -> Action {
        match roll {
            0..=24 => Action::Attack,
            25..=49 => Action::Defend,
            50..=74 => Action::Search,
            _ => Action::Weaken,
        }
    }
}

impl ActionPolicy for RandomPolicy {
    fn select(&mut self, _actor: &Character, _opponent: &Character, dice: &mut dyn Dice) -> String {
        Self::action_for_roll(dice.roll_percent()).name().to_string()
    }
}

/// Replays a fixed list of commands, then repeats a fallback forever
#[derive(Debug, Clone)]
pub struct ScriptedPolicy {
    commands: VecDeque<String>,
    fallback: String,
}

impl ScriptedPolicy {
    pub fn new<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedPolicy {
            commands: commands.into_iter().map(Into::into).collect(),
            fallback: Action::Defend.name().to_string(),
        }
    }

    /// Command used once the script is exhausted (default `defend`)
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }
}

impl ActionPolicy for ScriptedPolicy {
    fn select(
        &mut self,
        _actor: &Character,
        _opponent: &Character,
        _dice: &mut dyn Dice,
    ) -> String {
        self.commands
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlayerConstants;
    use crate::dice::ScriptedDice;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pair() -> (Character, Character) {
        let constants = PlayerConstants::default();
        (
            Character::default_player("One", &constants),
            Character::default_player("Two", &constants),
        )
    }

    #[test]
    fn test_roll_bands() {
        assert_eq!(RandomPolicy::action_for_roll(0), Action::Attack);
        assert_eq!(RandomPolicy::action_for_roll(24), Action::Attack);
        assert_eq!(RandomPolicy::action_for_roll(25), Action::Defend);
        assert_eq!(RandomPolicy::action_for_roll(49), Action::Defend);
        assert_eq!(RandomPolicy::action_for_roll(50), Action::Search);
        assert_eq!(RandomPolicy::action_for_roll(74), Action::Search);
        assert_eq!(RandomPolicy::action_for_roll(75), Action::Weaken);
        assert_eq!(RandomPolicy::action_for_roll(99), Action::Weaken);
    }

    #[test]
    fn test_random_policy_uses_one_roll() {
        let (actor, opponent) = pair();
        let mut dice = ScriptedDice::new([60]);
        let command = RandomPolicy.select(&actor, &opponent, &mut dice);
        assert_eq!(command, "search");
        assert_eq!(dice.remaining(), 0);
    }

    #[test]
    fn test_random_policy_is_roughly_uniform() {
        let (actor, opponent) = pair();
        let mut rng = StdRng::seed_from_u64(42);
        let mut policy = RandomPolicy;
        let mut counts = [0u32; 4];

        for _ in 0..4000 {
            let action: Action = policy.select(&actor, &opponent, &mut rng).parse().unwrap();
            let slot = Action::all().iter().position(|a| *a == action).unwrap();
            counts[slot] += 1;
        }

        for count in counts {
            assert!((850..=1150).contains(&count), "skewed counts: {counts:?}");
        }
    }

    #[test]
    fn test_scripted_policy_then_fallback() {
        let (actor, opponent) = pair();
        let mut dice = ScriptedDice::default();
        let mut policy = ScriptedPolicy::new(["attack", "nonsense"]).with_fallback("weaken");

        assert_eq!(policy.select(&actor, &opponent, &mut dice), "attack");
        assert_eq!(policy.select(&actor, &opponent, &mut dice), "nonsense");
        assert_eq!(policy.select(&actor, &opponent, &mut dice), "weaken");
        assert_eq!(policy.select(&actor, &opponent, &mut dice), "weaken");
    }
}
