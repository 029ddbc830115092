//! The capability shared by everything that can fight.

use super::attributes::Attributes;
use super::state::{CombatState, CombatantRef};

/// Anything that can take part in an encounter. The rules in
/// [`super::rules`] are written once against this trait.
pub trait Combatant {
    /// Stable reference used for targeting.
    fn combat_ref(&self) -> CombatantRef;

    /// Name shown in combat messages.
    fn display_name(&self) -> &str;

    fn attributes(&self) -> &Attributes;

    fn attributes_mut(&mut self) -> &mut Attributes;

    fn combat_state(&self) -> &CombatState;

    fn combat_state_mut(&mut self) -> &mut CombatState;

    fn level(&self) -> u32;

    fn base_strength(&self) -> i32;

    fn base_dexterity(&self) -> i32;

    fn base_constitution(&self) -> i32;

    /// Damage bonus from the wielded weapon (0 when unarmed).
    fn weapon_damage(&self) -> i32;

    /// Total defense from worn armor.
    fn armor_defense(&self) -> i32;

    fn is_alive(&self) -> bool {
        !self.attributes().is_dead()
    }

    fn in_combat(&self) -> bool {
        self.combat_state().is_active()
    }
}
