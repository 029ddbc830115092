//! The durable, player-controlled actor.

use duskhaven_combat::domain::attributes::{Attributes, Stats};
use duskhaven_combat::domain::combatant::Combatant;
use duskhaven_combat::domain::state::{CombatState, CombatantRef};
use duskhaven_core::ids::LocationId;
use duskhaven_dialogue::domain::state::DialogueBook;
use duskhaven_inventory::domain::equipment::Equipment;
use duskhaven_inventory::domain::inventory::Inventory;

/// An actor, identified by its case-sensitive name.
#[derive(Debug, Clone)]
pub struct Actor {
    pub name: String,
    pub attributes: Attributes,
    pub stats: Stats,
    pub location: LocationId,
    pub inventory: Inventory,
    pub equipment: Equipment,
    pub combat: CombatState,
    pub dialogue: DialogueBook,
}

impl Actor {
    /// A freshly created character with default attributes and stats.
    pub fn new(name: impl Into<String>, location: LocationId) -> Self {
        Self {
            name: name.into(),
            attributes: Attributes::default(),
            stats: Stats::default(),
            location,
            inventory: Inventory::new(),
            equipment: Equipment::new(),
            combat: CombatState::Idle,
            dialogue: DialogueBook::new(),
        }
    }

    /// One-line vitals summary.
    #[must_use]
    pub fn status_line(&self) -> String {
        let a = &self.attributes;
        format!(
            "Health {}/{}  Mana {}/{}  Stamina {}/{}  Level {}  Experience {}",
            a.health,
            a.max_health,
            a.mana,
            a.max_mana,
            a.stamina,
            a.max_stamina,
            self.stats.level,
            self.stats.experience
        )
    }
}

impl Combatant for Actor {
    fn combat_ref(&self) -> CombatantRef {
        CombatantRef::Actor(self.name.clone())
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    fn combat_state(&self) -> &CombatState {
        &self.combat
    }

    fn combat_state_mut(&mut self) -> &mut CombatState {
        &mut self.combat
    }

    fn level(&self) -> u32 {
        self.stats.level
    }

    fn base_strength(&self) -> i32 {
        self.stats.strength
    }

    fn base_dexterity(&self) -> i32 {
        self.stats.dexterity
    }

    fn base_constitution(&self) -> i32 {
        self.stats.constitution
    }

    fn weapon_damage(&self) -> i32 {
        self.equipment.weapon_damage()
    }

    fn armor_defense(&self) -> i32 {
        self.equipment.armor_defense()
    }
}
