//! Action resolution - The four action algorithms

use super::outcome::{ActionOutcome, OutcomeKind, SearchFind};
use crate::character::Character;
use crate::dice::Dice;
use tracing::debug;

/// Attack `target` for `max(1, attack - target.defense)` damage
pub fn attack(actor: &mut Character, target: &mut Character) -> ActionOutcome {
    let damage = target.take_damage(actor.attack());
    debug!(
        actor = actor.name(),
        target = target.name(),
        damage,
        target_health = target.current_health(),
        "attack"
    );
    ActionOutcome::new(
        actor.name(),
        OutcomeKind::Attack {
            target: target.name().to_string(),
            damage,
        },
    )
}

/// Raise the actor's defense by its defend amount
pub fn defend(actor: &mut Character) -> ActionOutcome {
    let gained = actor.increase_defense_amount();
    actor.increase_defense(gained);
    debug!(actor = actor.name(), gained, defense = actor.defense(), "defend");
    ActionOutcome::new(actor.name(), OutcomeKind::Defend { gained })
}

/// Search for a random find
///
/// Draws the percentile roll first, then a bonus in `[1, search]` when
/// search is positive (otherwise the bonus is 1).
pub fn search(actor: &mut Character, dice: &mut dyn Dice) -> ActionOutcome {
    let roll = dice.roll_percent();
    let bonus = match u32::try_from(actor.search()) {
        Ok(sides) if sides > 0 => i32::try_from(dice.roll_die(sides)).unwrap_or(i32::MAX),
        _ => 1,
    };

    let find = search_find(roll, bonus);
    match find {
        SearchFind::Jackpot { bonus } => {
            actor.increase_current_health(bonus.saturating_mul(3));
            actor.increase_attack(bonus);
            actor.increase_defense(bonus);
            actor.increase_search(bonus);
        }
        SearchFind::MagnifyingGlass { bonus } => actor.increase_search(bonus),
        SearchFind::Poison => actor.increase_weaken_modifier(1),
        SearchFind::HealingPotion { health } => actor.increase_current_health(health),
        SearchFind::Weapon { bonus } => actor.increase_attack(bonus),
    }

    debug!(actor = actor.name(), roll, bonus, ?find, "search");
    ActionOutcome::new(actor.name(), OutcomeKind::Search { find })
}

/// Map a percentile roll in `[0, 100)` to its find
///
/// | roll    | chance | find             |
/// |---------|--------|------------------|
/// | 0-1     | 2%     | jackpot          |
/// | 2-11    | 10%    | magnifying glass |
/// | 12-21   | 10%    | poison           |
/// | 22-49   | 28%    | healing potion   |
/// | 50-99   | 50%    | weapon           |
pub fn search_find(roll: u32, bonus: i32) -> SearchFind {
    match roll {
        0..=1 => SearchFind::Jackpot { bonus },
        2..=11 => SearchFind::MagnifyingGlass { bonus },
        12..=21 => SearchFind::Poison,
        22..=49 => SearchFind::HealingPotion {
            health: bonus.saturating_mul(3),
        },
        _ => SearchFind::Weapon { bonus },
    }
}

/// Drain the actor's weaken modifier from the target's health, defense and search
pub fn weaken(actor: &mut Character, target: &mut Character) -> ActionOutcome {
    let amount = actor.weaken_modifier();
    target.weakened(amount);
    debug!(
        actor = actor.name(),
        target = target.name(),
        amount,
        target_health = target.current_health(),
        "weaken"
    );
    ActionOutcome::new(
        actor.name(),
        OutcomeKind::Weaken {
            target: target.name().to_string(),
            amount,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{BaseStats, CharacterKind};
    use crate::dice::ScriptedDice;
    use proptest::prelude::*;

    fn character(attack: i32, defense: i32, search: i32) -> Character {
        Character::new(
            "Subject",
            CharacterKind::Player,
            BaseStats {
                base_health: 100,
                attack,
                defense,
                search,
                toughness: 0,
            },
            2,
        )
    }

    #[test]
    fn test_attack_minimum_damage() {
        let mut actor = character(5, 0, 0);
        let mut target = character(0, 999, 0);
        let outcome = attack(&mut actor, &mut target);
        assert_eq!(outcome.damage_dealt(), Some(1));
        assert_eq!(target.current_health(), 99);
    }

    #[test]
    fn test_attack_subtracts_defense() {
        let mut actor = character(12, 0, 0);
        let mut target = character(0, 9, 0);
        attack(&mut actor, &mut target);
        assert_eq!(target.current_health(), 97);
        assert_eq!(actor.current_health(), 100);
    }

    #[test]
    fn test_defend_only_raises_defense() {
        let mut actor = character(3, 9, 4);
        let before = actor.clone();
        let outcome = defend(&mut actor);

        assert_eq!(actor.defense(), 11);
        assert_eq!(actor.attack(), before.attack());
        assert_eq!(actor.search(), before.search());
        assert_eq!(actor.current_health(), before.current_health());
        assert_eq!(outcome.kind, OutcomeKind::Defend { gained: 2 });
    }

    #[test]
    fn test_defend_uses_character_amount() {
        let mut actor = character(3, 9, 4);
        actor.set_increase_defense_amount(5);
        defend(&mut actor);
        assert_eq!(actor.defense(), 14);
    }

    #[test]
    fn test_search_bands() {
        assert_eq!(search_find(0, 3), SearchFind::Jackpot { bonus: 3 });
        assert_eq!(search_find(1, 3), SearchFind::Jackpot { bonus: 3 });
        assert_eq!(search_find(2, 3), SearchFind::MagnifyingGlass { bonus: 3 });
        assert_eq!(search_find(11, 3), SearchFind::MagnifyingGlass { bonus: 3 });
        assert_eq!(search_find(12, 3), SearchFind::Poison);
        assert_eq!(search_find(21, 3), SearchFind::Poison);
        assert_eq!(search_find(22, 3), SearchFind::HealingPotion { health: 9 });
        assert_eq!(search_find(49, 3), SearchFind::HealingPotion { health: 9 });
        assert_eq!(search_find(50, 3), SearchFind::Weapon { bonus: 3 });
        assert_eq!(search_find(99, 3), SearchFind::Weapon { bonus: 3 });
    }

    #[test]
    fn test_search_band_widths() {
        let mut counts = [0u32; 5];
        for roll in 0..100 {
            let slot = match search_find(roll, 1) {
                SearchFind::Jackpot { .. } => 0,
                SearchFind::MagnifyingGlass { .. } => 1,
                SearchFind::Poison => 2,
                SearchFind::HealingPotion { .. } => 3,
                SearchFind::Weapon { .. } => 4,
            };
            counts[slot] += 1;
        }
        assert_eq!(counts, [2, 10, 10, 28, 50]);
    }

    #[test]
    fn test_search_jackpot() {
        let mut actor = character(3, 9, 4);
        // roll 1, bonus draw 2 -> bonus 3
        let mut dice = ScriptedDice::new([1, 2]);
        let outcome = search(&mut actor, &mut dice);

        assert_eq!(outcome.kind, OutcomeKind::Search { find: SearchFind::Jackpot { bonus: 3 } });
        assert_eq!(actor.attack(), 6);
        assert_eq!(actor.defense(), 12);
        assert_eq!(actor.search(), 7);
        assert_eq!(actor.current_health(), 109);
    }

    #[test]
    fn test_search_health_potion() {
        let mut actor = character(3, 9, 4);
        let mut dice = ScriptedDice::new([49, 0]);
        search(&mut actor, &mut dice);
        assert_eq!(actor.current_health(), 103);
        assert_eq!(actor.attack(), 3);
    }

    #[test]
    fn test_search_weapon() {
        let mut actor = character(3, 9, 4);
        let mut dice = ScriptedDice::new([99, 3]);
        search(&mut actor, &mut dice);
        assert_eq!(actor.attack(), 7);
    }

    #[test]
    fn test_search_poison_ignores_bonus() {
        let mut actor = character(3, 9, 4);
        let mut dice = ScriptedDice::new([15, 3]);
        search(&mut actor, &mut dice);
        assert_eq!(actor.weaken_modifier(), 2);
        assert_eq!(actor.search(), 4);
    }

    #[test]
    fn test_search_without_search_stat_skips_bonus_draw() {
        let mut actor = character(3, 9, 0);
        let mut dice = ScriptedDice::new([5]);
        let outcome = search(&mut actor, &mut dice);
        assert_eq!(
            outcome.kind,
            OutcomeKind::Search { find: SearchFind::MagnifyingGlass { bonus: 1 } }
        );
        assert_eq!(actor.search(), 1);
        assert_eq!(dice.remaining(), 0);
    }

    #[test]
    fn test_weaken_floors_each_stat() {
        let mut actor = character(3, 9, 4);
        actor.set_weaken_modifier(3);
        let mut target = character(0, 1, 5);

        let outcome = weaken(&mut actor, &mut target);

        assert_eq!(target.defense(), 0);
        assert_eq!(target.search(), 2);
        assert_eq!(target.current_health(), 97);
        assert_eq!(outcome.damage_dealt(), Some(3));
    }

    proptest! {
        #[test]
        fn prop_attack_deals_at_least_one(attack_stat in 0i32..500, defense in 0i32..500) {
            let mut actor = character(attack_stat, 0, 0);
            let mut target = character(0, defense, 0);
            let outcome = attack(&mut actor, &mut target);
            let damage = outcome.damage_dealt().unwrap();
            prop_assert!(damage >= 1);
            prop_assert_eq!(damage, (attack_stat - defense).max(1));
            prop_assert_eq!(target.current_health(), 100 - damage);
        }

        #[test]
        fn prop_weaken_never_drives_stats_negative(
            modifier in 0i32..50,
            defense in 0i32..50,
            search_stat in 0i32..50,
        ) {
            let mut actor = character(0, 0, 0);
            actor.set_weaken_modifier(modifier);
            let mut target = character(0, defense, search_stat);
            weaken(&mut actor, &mut target);
            prop_assert_eq!(target.defense(), (defense - modifier).max(0));
            prop_assert_eq!(target.search(), (search_stat - modifier).max(0));
            prop_assert_eq!(target.current_health(), 100 - modifier);
        }
    }
}
