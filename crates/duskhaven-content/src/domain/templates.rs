//! Room, item and mobile template records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::dialogue::DialogueTree;

/// Broad item category. Consumable categories are destroyed on use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    /// Wielded in the weapon slot.
    Weapon,
    /// Worn in an armor slot.
    Armor,
    /// Drinkable, heals.
    Potion,
    /// Readable, single use.
    Scroll,
    /// Edible, heals.
    Food,
    /// Opens things.
    Key,
    /// Anything else.
    #[default]
    Misc,
}

impl ItemCategory {
    /// Returns `true` for categories destroyed when used.
    #[must_use]
    pub fn is_consumable(self) -> bool {
        matches!(self, Self::Potion | Self::Scroll | Self::Food)
    }
}

/// Named equipment slot. An actor holds at most one item per slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipSlot {
    /// Main-hand weapon.
    Weapon,
    /// Off-hand shield.
    Shield,
    /// Helmets and hoods.
    Head,
    /// Chest armor.
    Body,
    /// Gloves.
    Hands,
    /// Greaves and trousers.
    Legs,
    /// Boots.
    Feet,
    /// A ring.
    Ring,
}

impl EquipSlot {
    /// Every slot, in display order.
    pub const ALL: [Self; 8] = [
        Self::Weapon,
        Self::Shield,
        Self::Head,
        Self::Body,
        Self::Hands,
        Self::Legs,
        Self::Feet,
        Self::Ring,
    ];

    /// Lowercase slot name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Weapon => "weapon",
            Self::Shield => "shield",
            Self::Head => "head",
            Self::Body => "body",
            Self::Hands => "hands",
            Self::Legs => "legs",
            Self::Feet => "feet",
            Self::Ring => "ring",
        }
    }
}

impl fmt::Display for EquipSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EquipSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|slot| slot.as_str() == lowered)
            .ok_or_else(|| format!("unknown equipment slot: {s}"))
    }
}

/// Behavioral flags on an item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemFlags {
    /// Cannot be picked up.
    pub fixed: bool,
    /// Cannot be dropped once carried.
    #[serde(alias = "nodrop")]
    pub no_drop: bool,
    /// Cannot be removed once equipped.
    pub cursed: bool,
}

/// Numeric and flag metadata carried by an item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemMetadata {
    /// Carry weight.
    pub weight: f64,
    /// Damage bonus when wielded.
    pub damage: i32,
    /// Defense bonus when worn.
    pub defense: i32,
    /// Health restored when used.
    pub healing: i32,
    /// Slot the item equips into, if any.
    pub slot: Option<EquipSlot>,
    /// Behavioral flags.
    pub flags: ItemFlags,
}

/// Immutable item definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemTemplate {
    /// Template identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Long description shown by `examine`.
    #[serde(default)]
    pub description: String,
    /// Item category.
    #[serde(default)]
    pub category: ItemCategory,
    /// Weight, bonuses and flags.
    #[serde(default)]
    pub metadata: ItemMetadata,
}

/// A named directed exit out of a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitTemplate {
    /// Direction keyword (`north`, `up`, `portal`, …).
    pub direction: String,
    /// Destination room id.
    pub destination: String,
}

/// Immutable room definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomTemplate {
    /// Room identifier.
    pub id: String,
    /// Short title.
    pub title: String,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Exits in display order.
    #[serde(default)]
    pub exits: Vec<ExitTemplate>,
    /// Item template ids placed here at world build.
    #[serde(default)]
    pub items: Vec<String>,
    /// Mobile template ids spawned here at world build.
    #[serde(default)]
    pub mobiles: Vec<String>,
}

/// Starting attributes of a mobile. Missing maxima default to the current
/// value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VitalsTemplate {
    /// Starting health.
    pub health: i32,
    /// Maximum health.
    pub max_health: Option<i32>,
    /// Starting mana.
    pub mana: i32,
    /// Maximum mana.
    pub max_mana: Option<i32>,
    /// Starting stamina.
    pub stamina: i32,
    /// Maximum stamina.
    pub max_stamina: Option<i32>,
}

impl Default for VitalsTemplate {
    fn default() -> Self {
        Self {
            health: 10,
            max_health: None,
            mana: 0,
            max_mana: None,
            stamina: 10,
            max_stamina: None,
        }
    }
}

/// Base stats of a mobile. Absent stats fall back to the engine default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsTemplate {
    /// Strength.
    pub strength: Option<i32>,
    /// Intelligence.
    pub intelligence: Option<i32>,
    /// Dexterity.
    pub dexterity: Option<i32>,
    /// Constitution.
    pub constitution: Option<i32>,
}

/// Immutable mobile (NPC) definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MobileTemplate {
    /// Template identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Long description shown by `examine`.
    #[serde(default)]
    pub description: String,
    /// Level; experience awarded on defeat scales with it.
    #[serde(default)]
    pub level: Option<u32>,
    /// Starting attributes.
    #[serde(default)]
    pub attributes: VitalsTemplate,
    /// Base stats.
    #[serde(default)]
    pub stats: StatsTemplate,
    /// Hostile mobiles engage actors who enter their location.
    #[serde(default)]
    pub hostile: bool,
    /// Natural weapon damage bonus.
    #[serde(default)]
    pub damage: i32,
    /// Natural armor.
    #[serde(default)]
    pub defense: i32,
    /// Conversation graph, if the mobile can hold a conversation.
    #[serde(default)]
    pub dialogue: Option<DialogueTree>,
    /// Single-line greeting used when there is no conversation graph.
    /// `{name}` is replaced with the actor's name.
    #[serde(default)]
    pub greeting: Option<String>,
    /// Milliseconds until a fresh instance reappears after death.
    #[serde(default)]
    pub respawn_ms: Option<u64>,
}

impl MobileTemplate {
    /// Level with the default of 1 applied.
    #[must_use]
    pub fn effective_level(&self) -> u32 {
        self.level.unwrap_or(1).max(1)
    }
}
