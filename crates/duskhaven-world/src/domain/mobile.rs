//! Live mobile (NPC) instances.

use duskhaven_combat::domain::attributes::{Attributes, DEFAULT_STAT, Stats};
use duskhaven_combat::domain::combatant::Combatant;
use duskhaven_combat::domain::state::{CombatState, CombatantRef};
use duskhaven_content::domain::templates::MobileTemplate;
use duskhaven_core::ids::{LocationId, MobileId};
use duskhaven_core::lookup::Named;

/// One living instance of a mobile template. A respawn creates a new
/// instance with a new id.
#[derive(Debug, Clone)]
pub struct Mobile {
    pub id: MobileId,
    pub template_id: String,
    pub name: String,
    pub description: String,
    pub location: LocationId,
    pub attributes: Attributes,
    pub stats: Stats,
    pub hostile: bool,
    pub damage: i32,
    pub defense: i32,
    pub respawn_ms: Option<u64>,
    pub combat: CombatState,
}

impl Mobile {
    /// Instantiates a template at full health in `location`.
    #[must_use]
    pub fn from_template(template: &MobileTemplate, location: LocationId) -> Self {
        let vitals = &template.attributes;
        let max_health = vitals.max_health.unwrap_or(vitals.health).max(1);
        let max_mana = vitals.max_mana.unwrap_or(vitals.mana).max(0);
        let max_stamina = vitals.max_stamina.unwrap_or(vitals.stamina).max(0);
        let stats = &template.stats;
        Self {
            id: MobileId::new(),
            template_id: template.id.clone(),
            name: template.name.clone(),
            description: template.description.clone(),
            location,
            attributes: Attributes::full(max_health, max_mana, max_stamina),
            stats: Stats {
                level: template.effective_level(),
                experience: 0,
                strength: stats.strength.unwrap_or(DEFAULT_STAT),
                intelligence: stats.intelligence.unwrap_or(DEFAULT_STAT),
                dexterity: stats.dexterity.unwrap_or(DEFAULT_STAT),
                constitution: stats.constitution.unwrap_or(DEFAULT_STAT),
            },
            hostile: template.hostile,
            damage: template.damage,
            defense: template.defense,
            respawn_ms: template.respawn_ms,
            combat: CombatState::Idle,
        }
    }
}

impl Named for Mobile {
    fn key(&self) -> &str {
        &self.template_id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Combatant for Mobile {
    fn combat_ref(&self) -> CombatantRef {
        CombatantRef::Mobile(self.id)
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
        self.damage
    }

    fn armor_defense(&self) -> i32 {
        self.defense
    }
}
