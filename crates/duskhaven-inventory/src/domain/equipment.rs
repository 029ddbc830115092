//! Equipment slots: at most one item per slot.

use std::collections::BTreeMap;

use duskhaven_content::domain::templates::EquipSlot;
use duskhaven_core::error::DomainError;
use duskhaven_core::lookup::resolve;
use serde::{Deserialize, Serialize};

use super::inventory::{Inventory, InventoryLimits};
use super::item::{Item, ItemAction};

/// Worn and wielded items keyed by slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Equipment {
    slots: BTreeMap<EquipSlot, Item>,
}

impl Equipment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Item in `slot`, if any.
    #[must_use]
    pub fn get(&self, slot: EquipSlot) -> Option<&Item> {
        self.slots.get(&slot)
    }

    /// Occupied slots in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (EquipSlot, &Item)> {
        self.slots.iter().map(|(slot, item)| (*slot, item))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Damage bonus of the wielded weapon, 0 when unarmed.
    #[must_use]
    pub fn weapon_damage(&self) -> i32 {
        self.slots
            .get(&EquipSlot::Weapon)
            .map_or(0, |item| item.metadata.damage)
    }

    /// Defense summed over every equipped item.
    #[must_use]
    pub fn armor_defense(&self) -> i32 {
        self.slots.values().map(|item| item.metadata.defense).sum()
    }

    /// Places an item directly into its slot, replacing nothing. Used when
    /// restoring durable records.
    pub fn insert(&mut self, item: Item) -> Option<Item> {
        let slot = item.slot()?;
        if self.slots.contains_key(&slot) {
            return Some(item);
        }
        self.slots.insert(slot, item);
        None
    }

    /// Finds the slot holding an item matching `query`.
    fn find_slot(&self, query: &str) -> Option<EquipSlot> {
        if let Ok(slot) = query.parse::<EquipSlot>() {
            if self.slots.contains_key(&slot) {
                return Some(slot);
            }
        }
        let worn: Vec<(&EquipSlot, &Item)> = self.slots.iter().collect();
        let items: Vec<&Item> = worn.iter().map(|(_, item)| *item).collect();
        resolve(&items, query).map(|index| *worn[index].0)
    }
}

/// Moves an item matching `query` from the inventory into its slot.
///
/// # Errors
///
/// Returns `DomainError::Rejected` if the item is not carried, has no slot,
/// or the slot is already occupied.
pub fn equip(
    inventory: &mut Inventory,
    equipment: &mut Equipment,
    query: &str,
) -> Result<Item, DomainError> {
    let candidate = inventory
        .find(query)
        .ok_or_else(|| DomainError::rejected("You aren't carrying that."))?;
    candidate.check(ItemAction::Equip)?;
    let Some(slot) = candidate.slot() else {
        return Err(DomainError::rejected(format!(
            "You cannot equip the {}.",
            candidate.name
        )));
    };
    if let Some(worn) = equipment.get(slot) {
        return Err(DomainError::rejected(format!(
            "You are already using the {} as your {slot}.",
            worn.name
        )));
    }

    let item = inventory
        .remove(query)
        .ok_or_else(|| DomainError::rejected("You aren't carrying that."))?;
    equipment.slots.insert(slot, item.clone());
    Ok(item)
}

/// Moves an equipped item matching `query` (by name or slot) back into the inventory.
///
/// # Errors
///
/// Returns `DomainError::Rejected` if nothing matches, the item is cursed,
/// or the inventory is already at its item-count cap.
pub fn unequip(
    inventory: &mut Inventory,
    equipment: &mut Equipment,
    query: &str,
    limits: &InventoryLimits,
) -> Result<Item, DomainError> {
    let slot = equipment
        .find_slot(query)
        .ok_or_else(|| DomainError::rejected("You aren't using that."))?;
    if let Some(item) = equipment.get(slot) {
        item.check(ItemAction::Unequip)?;
    }
    if inventory.is_full(limits) {
        return Err(DomainError::rejected(
            "Your hands are full. Drop something first.",
        ));
    }

    let item = equipment
        .slots
        .remove(&slot)
        .ok_or_else(|| DomainError::rejected("You aren't using that."))?;
    inventory.push(item.clone());
    Ok(item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use duskhaven_content::domain::templates::{
        ItemCategory, ItemFlags, ItemMetadata, ItemTemplate,
    };

    fn gear(id: &str, name: &str, slot: EquipSlot, damage: i32, defense: i32) -> Item {
        Item::from_template(&ItemTemplate {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            category: if slot == EquipSlot::Weapon {
                ItemCategory::Weapon
            } else {
                ItemCategory::Armor
            },
            metadata: ItemMetadata {
                weight: 1.0,
                damage,
                defense,
                slot: Some(slot),
                ..ItemMetadata::default()
            },
        })
    }

    #[test]
    fn test_equip_moves_item_into_its_slot() {
        // Arrange
        let mut inventory =
            Inventory::from_items(vec![gear("sword", "iron sword", EquipSlot::Weapon, 5, 0)]);
        let mut equipment = Equipment::new();

        // Act
        let item = equip(&mut inventory, &mut equipment, "sword").unwrap();

        // Assert
        assert_eq!(item.name, "iron sword");
        assert!(inventory.is_empty());
        assert_eq!(equipment.weapon_damage(), 5);
    }

    #[test]
    fn test_equip_into_occupied_slot_is_rejected() {
        let mut inventory =
            Inventory::from_items(vec![gear("axe", "hand axe", EquipSlot::Weapon, 4, 0)]);
        let mut equipment = Equipment::new();
        equipment.insert(gear("sword", "iron sword", EquipSlot::Weapon, 5, 0));

        let err = equip(&mut inventory, &mut equipment, "axe").unwrap_err();

        assert!(err.player_message().contains("iron sword"));
        assert_eq!(inventory.len(), 1);
        assert_eq!(equipment.weapon_damage(), 5);
    }

    #[test]
    fn test_unequip_by_slot_name_returns_item_to_inventory() {
        let mut inventory = Inventory::new();
        let mut equipment = Equipment::new();
        equipment.insert(gear("helm", "dented helm", EquipSlot::Head, 0, 2));

        let item = unequip(
            &mut inventory,
            &mut equipment,
            "head",
            &InventoryLimits::default(),
        )
        .unwrap();

        assert_eq!(item.name, "dented helm");
        assert!(equipment.is_empty());
        assert_eq!(inventory.len(), 1);
    }

    #[test]
    fn test_unequip_cursed_item_is_rejected() {
        let mut ring = gear("ring", "black ring", EquipSlot::Ring, 0, 0);
        ring.metadata.flags = ItemFlags {
            cursed: true,
            ..ItemFlags::default()
        };
        let mut inventory = Inventory::new();
        let mut equipment = Equipment::new();
        equipment.insert(ring);

        let err = unequip(
            &mut inventory,
            &mut equipment,
            "ring",
            &InventoryLimits::default(),
        )
        .unwrap_err();

        assert_eq!(
            err.player_message(),
            "The black ring is cursed! You cannot remove it."
        );
        assert!(equipment.get(EquipSlot::Ring).is_some());
    }

    #[test]
    fn test_unequip_with_full_inventory_is_rejected() {
        let limits = InventoryLimits {
            max_items: 1,
            max_weight: 100.0,
        };
        let mut inventory =
            Inventory::from_items(vec![gear("boots", "boots", EquipSlot::Feet, 0, 1)]);
        let mut equipment = Equipment::new();
        equipment.insert(gear("helm", "dented helm", EquipSlot::Head, 0, 2));

        let result = unequip(&mut inventory, &mut equipment, "helm", &limits);

        assert!(result.is_err());
        assert!(equipment.get(EquipSlot::Head).is_some());
        assert_eq!(inventory.len(), 1);
    }

    #[test]
    fn test_armor_defense_sums_all_equipped_items() {
        let mut equipment = Equipment::new();
        equipment.insert(gear("helm", "helm", EquipSlot::Head, 0, 2));
        equipment.insert(gear("mail", "chain mail", EquipSlot::Body, 0, 5));
        equipment.insert(gear("sword", "sword", EquipSlot::Weapon, 6, 0));

        assert_eq!(equipment.armor_defense(), 7);
        assert_eq!(equipment.weapon_damage(), 6);
    }
}
