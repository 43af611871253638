//! Character - Combatant state and the primitive mutations actions are built from

mod generator;
mod snapshot;

pub use generator::{
    AllocationError, BaseStats, PlayerPreset, PointBuy, StatAllocation, StatGenerator,
};
pub use snapshot::StatSnapshot;

use crate::config::PlayerConstants;
use crate::dice::Dice;
use serde::{Deserialize, Serialize};

/// Who controls a character and what that implies for its state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum CharacterKind {
    /// Human-controlled, no extra state
    Player,
    /// AI-controlled, created at `level` (turn of creation + 1)
    Ai { level: u32 },
}

impl CharacterKind {
    /// AI level, if this is an AI character
    pub fn level(&self) -> Option<u32> {
        match self {
            CharacterKind::Player => None,
            CharacterKind::Ai { level } => Some(*level),
        }
    }

    pub fn is_ai(&self) -> bool {
        matches!(self, CharacterKind::Ai { .. })
    }
}

/// One combatant's mutable state
///
/// Stat setters silently ignore negative values. `current_health` has no
/// floor: damage may drive it below zero and death is an `<= 0` check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    name: String,
    kind: CharacterKind,
    base_health: i32,
    current_health: i32,
    attack: i32,
    defense: i32,
    search: i32,
    toughness: i32,
    weaken_modifier: i32,
    increase_defense_amount: i32,
}

impl Character {
    /// Create a character from explicit stats
    ///
    /// Attack and defense are taken as already converted from points. Base
    /// health is scaled by toughness (+5% per point) and current health starts
    /// at the scaled value.
    pub fn new(
        name: impl Into<String>,
        kind: CharacterKind,
        stats: BaseStats,
        increase_defense_amount: i32,
    ) -> Self {
        let mut character = Character {
            name: name.into(),
            kind,
            base_health: 0,
            current_health: 0,
            attack: 0,
            defense: 0,
            search: 0,
            toughness: 0,
            weaken_modifier: 1,
            increase_defense_amount,
        };
        character.set_base_health(stats.base_health);
        character.set_attack(stats.attack);
        character.set_defense(stats.defense);
        character.set_search(stats.search);
        character.set_toughness(stats.toughness);
        character.scale_starting_health();
        character
    }

    /// Create a character from a stat generator
    pub fn generated(
        name: impl Into<String>,
        kind: CharacterKind,
        generator: &dyn StatGenerator,
        increase_defense_amount: i32,
        dice: &mut dyn Dice,
    ) -> Self {
        let stats = generator.generate(dice);
        Self::new(name, kind, stats, increase_defense_amount)
    }

    /// Player character with the configured preset stats
    pub fn default_player(name: impl Into<String>, constants: &PlayerConstants) -> Self {
        let stats = PlayerPreset::from_constants(constants).stats();
        Self::new(name, CharacterKind::Player, stats, constants.defend_amount)
    }

    /// Player character from a point allocation
    ///
    /// The allocation is not checked against the point budget here; callers
    /// enforce it with [`StatAllocation::validate`].
    pub fn allocated_player(
        name: impl Into<String>,
        allocation: StatAllocation,
        constants: &PlayerConstants,
    ) -> Self {
        let stats = allocation.to_base_stats(constants.base_health);
        Self::new(name, CharacterKind::Player, stats, constants.defend_amount)
    }

    /// Scale base health by toughness and start current health at it
    ///
    /// `round(base * (1 + 0.05 * toughness))`, rounding halves up, computed
    /// in integers so no float error creeps into the result. Runs once, from
    /// [`Character::new`].
    fn scale_starting_health(&mut self) {
        let scaled = i64::from(self.base_health) * (20 + i64::from(self.toughness));
        let rounded = (scaled * 2 + 20).div_euclid(40);
        self.set_base_health(i32::try_from(rounded).unwrap_or(i32::MAX));
        self.current_health = self.base_health;
    }

    // === Queries ===

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> CharacterKind {
        self.kind
    }

    pub fn base_health(&self) -> i32 {
        self.base_health
    }

    pub fn current_health(&self) -> i32 {
        self.current_health
    }

    pub fn attack(&self) -> i32 {
        self.attack
    }

    pub fn defense(&self) -> i32 {
        self.defense
    }

    pub fn search(&self) -> i32 {
        self.search
    }

    pub fn toughness(&self) -> i32 {
        self.toughness
    }

    pub fn weaken_modifier(&self) -> i32 {
        self.weaken_modifier
    }

    /// Defense gained per defend action
    pub fn increase_defense_amount(&self) -> i32 {
        self.increase_defense_amount
    }

    /// Check if the character is alive
    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    /// Read-only copy of the current stats
    pub fn snapshot(&self) -> StatSnapshot {
        StatSnapshot::of(self)
    }

    // === Setters (negative values are ignored) ===

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_attack(&mut self, attack: i32) {
        if attack >= 0 {
            self.attack = attack;
        }
    }

    pub fn set_defense(&mut self, defense: i32) {
        if defense >= 0 {
            self.defense = defense;
        }
    }

    pub fn set_search(&mut self, search: i32) {
        if search >= 0 {
            self.search = search;
        }
    }

    pub fn set_toughness(&mut self, toughness: i32) {
        if toughness >= 0 {
            self.toughness = toughness;
        }
    }

    pub fn set_weaken_modifier(&mut self, weaken_modifier: i32) {
        if weaken_modifier >= 0 {
            self.weaken_modifier = weaken_modifier;
        }
    }

    pub fn set_increase_defense_amount(&mut self, amount: i32) {
        self.increase_defense_amount = amount;
    }

    fn set_base_health(&mut self, base_health: i32) {
        if base_health > 0 {
            self.base_health = base_health;
        }
    }

    // === Mutations used by action resolution ===

    /// Apply incoming damage reduced by defense, never less than 1
    ///
    /// Returns the damage actually dealt.
    pub(crate) fn take_damage(&mut self, damage: i32) -> i32 {
        let dealt = damage.saturating_sub(self.defense).max(1);
        self.current_health = self.current_health.saturating_sub(dealt);
        dealt
    }

    /// Lose `amount` health, defense and search; the two stats floor at 0
    pub(crate) fn weakened(&mut self, amount: i32) {
        self.current_health = self.current_health.saturating_sub(amount);
        self.defense = self.defense.saturating_sub(amount).max(0);
        self.search = self.search.saturating_sub(amount).max(0);
    }

    pub(crate) fn increase_current_health(&mut self, amount: i32) {
        self.current_health = self.current_health.saturating_add(amount);
    }

    pub(crate) fn increase_attack(&mut self, amount: i32) {
        self.set_attack(self.attack.saturating_add(amount));
    }

    pub(crate) fn increase_defense(&mut self, amount: i32) {
        self.set_defense(self.defense.saturating_add(amount));
    }

    pub(crate) fn increase_search(&mut self, amount: i32) {
        self.set_search(self.search.saturating_add(amount));
    }

    pub(crate) fn increase_weaken_modifier(&mut self, amount: i32) {
        self.set_weaken_modifier(self.weaken_modifier.saturating_add(amount));
    }

    pub(crate) fn set_current_health(&mut self, health: i32) {
        self.current_health = health;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(base_health: i32, toughness: i32) -> BaseStats {
        BaseStats {
            base_health,
            attack: 3,
            defense: 9,
            search: 4,
            toughness,
        }
    }

    #[test]
    fn test_toughness_scales_base_health() {
        let hero = Character::new("Hero", CharacterKind::Player, stats(100, 2), 2);
        assert_eq!(hero.base_health(), 110);
        assert_eq!(hero.current_health(), 110);

        let plain = Character::new("Plain", CharacterKind::Player, stats(30, 0), 2);
        assert_eq!(plain.base_health(), 30);
    }

    #[test]
    fn test_base_health_is_scaled_only_at_construction() {
        let mut hero = Character::new("Hero", CharacterKind::Player, stats(100, 2), 2);
        assert_eq!(hero.base_health(), 110);

        hero.set_toughness(10);
        hero.take_damage(30);
        assert_eq!(hero.base_health(), 110);
        assert_eq!(hero.current_health(), 89);
    }

    #[test]
    fn test_toughness_rounds_halves_up() {
        // 30 * 1.05 = 31.5
        let robot = Character::new("Robot", CharacterKind::Ai { level: 1 }, stats(30, 1), 2);
        assert_eq!(robot.base_health(), 32);
        // 30 * 1.15 = 34.5
        let robot = Character::new("Robot", CharacterKind::Ai { level: 1 }, stats(30, 3), 2);
        assert_eq!(robot.base_health(), 35);
        // 30 * 1.10 = 33
        let robot = Character::new("Robot", CharacterKind::Ai { level: 1 }, stats(30, 2), 2);
        assert_eq!(robot.base_health(), 33);
    }

    #[test]
    fn test_default_player_preset() {
        let hero = Character::default_player("Hero", &PlayerConstants::default());
        assert_eq!(hero.attack(), 3);
        assert_eq!(hero.defense(), 9);
        assert_eq!(hero.search(), 4);
        assert_eq!(hero.toughness(), 2);
        assert_eq!(hero.base_health(), 110);
        assert_eq!(hero.weaken_modifier(), 1);
        assert_eq!(hero.increase_defense_amount(), 2);
        assert_eq!(hero.kind(), CharacterKind::Player);
    }

    #[test]
    fn test_negative_setters_are_ignored() {
        let mut hero = Character::default_player("Hero", &PlayerConstants::default());
        hero.set_attack(-5);
        hero.set_defense(-1);
        hero.set_search(-2);
        hero.set_toughness(-3);
        hero.set_weaken_modifier(-1);
        assert_eq!(hero.attack(), 3);
        assert_eq!(hero.defense(), 9);
        assert_eq!(hero.search(), 4);
        assert_eq!(hero.toughness(), 2);
        assert_eq!(hero.weaken_modifier(), 1);

        hero.set_attack(0);
        assert_eq!(hero.attack(), 0);
    }

    #[test]
    fn test_negative_explicit_stats_start_at_zero() {
        let odd = Character::new(
            "Odd",
            CharacterKind::Player,
            BaseStats {
                base_health: 50,
                attack: -3,
                defense: -9,
                search: 2,
                toughness: -1,
            },
            2,
        );
        assert_eq!(odd.attack(), 0);
        assert_eq!(odd.defense(), 0);
        assert_eq!(odd.toughness(), 0);
        assert_eq!(odd.base_health(), 50);
    }

    #[test]
    fn test_take_damage_has_floor_of_one() {
        let mut target = Character::new("Wall", CharacterKind::Player, stats(100, 0), 2);
        target.set_defense(999);
        assert_eq!(target.take_damage(5), 1);
        assert_eq!(target.current_health(), 99);

        target.set_defense(2);
        assert_eq!(target.take_damage(10), 8);
        assert_eq!(target.current_health(), 91);
    }

    #[test]
    fn test_health_is_not_clamped() {
        let mut target = Character::new("Glass", CharacterKind::Player, stats(5, 0), 2);
        target.set_defense(0);
        target.take_damage(20);
        assert_eq!(target.current_health(), -15);
        assert!(!target.is_alive());
    }

    #[test]
    fn test_weakened_floors_stats_independently() {
        let mut target = Character::new("Target", CharacterKind::Player, stats(50, 0), 2);
        target.set_defense(1);
        target.set_search(5);
        target.weakened(3);
        assert_eq!(target.defense(), 0);
        assert_eq!(target.search(), 2);
        assert_eq!(target.current_health(), 47);
    }

    #[test]
    fn test_rename() {
        let mut hero = Character::default_player("Hero", &PlayerConstants::default());
        hero.set_name("Renamed");
        assert_eq!(hero.name(), "Renamed");
    }

    #[test]
    fn test_kind_level() {
        assert_eq!(CharacterKind::Player.level(), None);
        assert_eq!(CharacterKind::Ai { level: 4 }.level(), Some(4));
        assert!(CharacterKind::Ai { level: 4 }.is_ai());
    }
}
