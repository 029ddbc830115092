//! The durable actor record as written to the backing store.

use chrono::{DateTime, Utc};
use duskhaven_combat::domain::attributes::{Attributes, Stats};
use duskhaven_core::error::DomainError;
use duskhaven_core::ids::LocationId;
use duskhaven_inventory::domain::equipment::Equipment;
use duskhaven_inventory::domain::inventory::Inventory;
use duskhaven_inventory::domain::item::Item;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::actor::Actor;

/// Store kind under which actor records live.
pub const ACTOR_KIND: &str = "actor";

const REQUIRED_ATTRIBUTES: [&str; 6] = [
    "health",
    "maxHealth",
    "mana",
    "maxMana",
    "stamina",
    "maxStamina",
];

const REQUIRED_STATS: [&str; 6] = [
    "level",
    "experience",
    "strength",
    "intelligence",
    "dexterity",
    "constitution",
];

/// Vitals as read from the store. Any JSON number is accepted here and
/// saturated into range; `restore` repairs what is still out of bounds.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredAttributes {
    health: f64,
    max_health: f64,
    mana: f64,
    max_mana: f64,
    stamina: f64,
    max_stamina: f64,
}

impl From<StoredAttributes> for Attributes {
    fn from(stored: StoredAttributes) -> Self {
        Self {
            health: saturate_i32(stored.health),
            max_health: saturate_i32(stored.max_health),
            mana: saturate_i32(stored.mana),
            max_mana: saturate_i32(stored.max_mana),
            stamina: saturate_i32(stored.stamina),
            max_stamina: saturate_i32(stored.max_stamina),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredStats {
    level: f64,
    experience: f64,
    strength: f64,
    intelligence: f64,
    dexterity: f64,
    constitution: f64,
}

impl From<StoredStats> for Stats {
    fn from(stored: StoredStats) -> Self {
        Self {
            level: saturate_u32(stored.level),
            experience: saturate_u32(stored.experience),
            strength: saturate_i32(stored.strength),
            intelligence: saturate_i32(stored.intelligence),
            dexterity: saturate_i32(stored.dexterity),
            constitution: saturate_i32(stored.constitution),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredRecord {
    name: String,
    attributes: StoredAttributes,
    stats: StoredStats,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    inventory: Vec<Item>,
    #[serde(default)]
    equipment: Vec<Item>,
    #[serde(default)]
    saved_at: Option<DateTime<Utc>>,
}

// Float-to-int `as` casts saturate at the bounds and map NaN to zero.
#[allow(clippy::cast_possible_truncation)]
fn saturate_i32(value: f64) -> i32 {
    value.trunc() as i32
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn saturate_u32(value: f64) -> u32 {
    value.trunc() as u32
}

/// Serialized form of an [`Actor`]. Combat and dialogue state are not stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorRecord {
    pub name: String,
    pub attributes: Attributes,
    pub stats: Stats,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub inventory: Vec<Item>,
    #[serde(default)]
    pub equipment: Vec<Item>,
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
}

impl ActorRecord {
    /// Snapshot of an actor's durable state.
    #[must_use]
    pub fn from_actor(actor: &Actor, saved_at: DateTime<Utc>) -> Self {
        Self {
            name: actor.name.clone(),
            attributes: actor.attributes,
            stats: actor.stats,
            location: Some(actor.location.to_string()),
            inventory: actor.inventory.items().to_vec(),
            equipment: actor.equipment.iter().map(|(_, item)| item.clone()).collect(),
            saved_at: Some(saved_at),
        }
    }

    /// Parses a stored value, rejecting records whose required numeric
    /// fields are missing or not numbers. Numbers outside a field's range
    /// are saturated, not rejected.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` describing the first problem found.
    pub fn parse(name: &str, value: Value) -> Result<Self, DomainError> {
        for (section, fields) in [
            ("attributes", &REQUIRED_ATTRIBUTES),
            ("stats", &REQUIRED_STATS),
        ] {
            for field in fields {
                let numeric = value
                    .get(section)
                    .and_then(|s| s.get(field))
                    .is_some_and(Value::is_number);
                if !numeric {
                    return Err(DomainError::Validation(format!(
                        "record {name}: {section}.{field} is missing or not a number"
                    )));
                }
            }
        }
        let stored: StoredRecord = serde_json::from_value(value)
            .map_err(|e| DomainError::Validation(format!("record {name}: {e}")))?;
        Ok(Self {
            name: stored.name,
            attributes: stored.attributes.into(),
            stats: stored.stats.into(),
            location: stored.location,
            inventory: stored.inventory,
            equipment: stored.equipment,
            saved_at: stored.saved_at,
        })
    }

    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Rebuilds the actor. A record without a location gets `fallback`;
    /// equipped items that no longer fit a free slot go back to the inventory.
    #[must_use]
    pub fn into_actor(self, fallback: &LocationId) -> Actor {
        let location = self
            .location
            .filter(|id| !id.is_empty())
            .map_or_else(|| fallback.clone(), LocationId::new);
        let mut actor = Actor::new(self.name, location);
        actor.attributes = self.attributes;
        actor.stats = self.stats;
        actor.inventory = Inventory::from_items(self.inventory);
        let mut equipment = Equipment::new();
        for item in self.equipment {
            if let Some(displaced) = equipment.insert(item) {
                actor.inventory.push(displaced);
            }
        }
        actor.equipment = equipment;
        actor
    }
}
