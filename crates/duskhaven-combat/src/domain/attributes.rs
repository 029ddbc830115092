//! Vital attributes and base stats.

use serde::{Deserialize, Serialize};

/// Base value used for any stat a template leaves out.
pub const DEFAULT_STAT: i32 = 10;

/// Current and maximum vitals. Invariant: `0 <= value <= max` for each pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attributes {
    pub health: i32,
    pub max_health: i32,
    pub mana: i32,
    pub max_mana: i32,
    pub stamina: i32,
    pub max_stamina: i32,
}

impl Attributes {
    /// Full vitals at the given maxima.
    #[must_use]
    pub fn full(max_health: i32, max_mana: i32, max_stamina: i32) -> Self {
        Self {
            health: max_health,
            max_health,
            mana: max_mana,
            max_mana,
            stamina: max_stamina,
            max_stamina,
        }
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Subtracts damage, never going below zero. Returns the remaining health.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        self.health = self.health.saturating_sub(amount.max(0)).max(0);
        self.health
    }

    /// Adds health up to the maximum. Returns how much was actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.health;
        self.health = self.health.saturating_add(amount.max(0)).min(self.max_health);
        self.health - before
    }

    /// Sets health to `floor(max_health * fraction)`, at least 1.
    #[allow(clippy::cast_possible_truncation)]
    pub fn heal_to_fraction(&mut self, fraction: f64) {
        let target = (f64::from(self.max_health) * fraction).floor() as i32;
        self.health = target.clamp(1, self.max_health.max(1));
    }

    /// Forces every pair back into `[floor, max]`, where the health floor is 1
    /// and the mana and stamina floors are 0. Returns whether anything changed.
    pub fn repair(&mut self) -> bool {
        let before = *self;
        self.max_health = self.max_health.max(1);
        self.max_mana = self.max_mana.max(0);
        self.max_stamina = self.max_stamina.max(0);
        self.health = self.health.clamp(1, self.max_health);
        self.mana = self.mana.clamp(0, self.max_mana);
        self.stamina = self.stamina.clamp(0, self.max_stamina);
        before != *self
    }
}

impl Default for Attributes {
    fn default() -> Self {
        Self::full(100, 50, 100)
    }
}

/// Level, experience and the four base stats. All non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub level: u32,
    pub experience: u32,
    pub strength: i32,
    pub intelligence: i32,
    pub dexterity: i32,
    pub constitution: i32,
}

impl Stats {
    /// Adds experience, saturating.
    pub fn gain_experience(&mut self, amount: u32) {
        self.experience = self.experience.saturating_add(amount);
    }

    /// Raises any negative base stat to zero. Returns whether anything changed.
    pub fn repair(&mut self) -> bool {
        let before = *self;
        self.level = self.level.max(1);
        self.strength = self.strength.max(0);
        self.intelligence = self.intelligence.max(0);
        self.dexterity = self.dexterity.max(0);
        self.constitution = self.constitution.max(0);
        before != *self
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            level: 1,
            experience: 0,
            strength: DEFAULT_STAT,
            intelligence: DEFAULT_STAT,
            dexterity: DEFAULT_STAT,
            constitution: DEFAULT_STAT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_attributes_are_full() {
        let attrs = Attributes::default();

        assert_eq!(attrs.health, 100);
        assert_eq!(attrs.max_health, 100);
        assert_eq!(attrs.mana, 50);
        assert_eq!(attrs.stamina, 100);
    }

    #[test]
    fn test_take_damage_never_goes_below_zero() {
        let mut attrs = Attributes::full(10, 0, 0);

        let remaining = attrs.take_damage(25);

        assert_eq!(remaining, 0);
        assert!(attrs.is_dead());
    }

    #[test]
    fn test_heal_is_capped_at_max() {
        let mut attrs = Attributes::full(20, 0, 0);
        attrs.health = 15;

        let restored = attrs.heal(10);

        assert_eq!(restored, 5);
        assert_eq!(attrs.health, 20);
    }

    #[test]
    fn test_huge_heal_saturates_at_max() {
        let mut attrs = Attributes::full(100, 0, 0);
        attrs.health = 40;

        let restored = attrs.heal(i32::MAX);

        assert_eq!(restored, 60);
        assert_eq!(attrs.health, 100);
    }

    #[test]
    fn test_heal_to_half_floors() {
        let mut attrs = Attributes::full(75, 0, 0);
        attrs.health = 0;

        attrs.heal_to_fraction(0.5);

        assert_eq!(attrs.health, 37);
    }

    #[test]
    fn test_repair_lowers_health_above_max() {
        let mut attrs = Attributes::default();
        attrs.health = 150;

        assert!(attrs.repair());
        assert_eq!(attrs.health, 100);
    }

    #[test]
    fn test_repair_raises_health_to_one_and_pools_to_zero() {
        let mut attrs = Attributes::default();
        attrs.health = -4;
        attrs.mana = -1;
        attrs.stamina = -30;

        attrs.repair();

        assert_eq!(attrs.health, 1);
        assert_eq!(attrs.mana, 0);
        assert_eq!(attrs.stamina, 0);
    }

    #[test]
    fn test_repair_leaves_valid_values_alone() {
        let mut attrs = Attributes::default();
        assert!(!attrs.repair());
    }

    #[test]
    fn test_default_stats() {
        let stats = Stats::default();

        assert_eq!(stats.level, 1);
        assert_eq!(stats.experience, 0);
        assert_eq!(stats.strength, 10);
        assert_eq!(stats.constitution, 10);
    }
}
