//! Item instances and the item capability check.

use duskhaven_content::domain::templates::{EquipSlot, ItemCategory, ItemMetadata, ItemTemplate};
use duskhaven_core::error::DomainError;
use duskhaven_core::ids::ItemId;
use duskhaven_core::lookup::Named;
use serde::{Deserialize, Serialize};

/// Something a holder wants to do with an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemAction {
    /// Pick up from a location.
    Take,
    /// Put down into a location.
    Drop,
    /// Move from inventory into a slot.
    Equip,
    /// Move from a slot back into inventory.
    Unequip,
    /// Consume or apply.
    Use,
}

/// An independent copy of an item template, owned by exactly one container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Instance identifier.
    pub id: ItemId,
    /// Template this instance was created from.
    pub template_id: String,
    /// Display name.
    pub name: String,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Category.
    #[serde(default)]
    pub category: ItemCategory,
    /// Weight, bonuses and flags.
    #[serde(default)]
    pub metadata: ItemMetadata,
}

impl Item {
    /// Creates a fresh instance of a template.
    #[must_use]
    pub fn from_template(template: &ItemTemplate) -> Self {
        Self {
            id: ItemId::new(),
            template_id: template.id.clone(),
            name: template.name.clone(),
            description: template.description.clone(),
            category: template.category,
            metadata: template.metadata.clone(),
        }
    }

    /// Carry weight.
    #[must_use]
    pub fn weight(&self) -> f64 {
        self.metadata.weight
    }

    /// Slot this item equips into.
    #[must_use]
    pub fn slot(&self) -> Option<EquipSlot> {
        self.metadata.slot
    }

    /// The one place item flags are enforced.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Rejected` with a player-facing message if the
    /// item's flags or category forbid the action.
    pub fn check(&self, action: ItemAction) -> Result<(), DomainError> {
        let flags = self.metadata.flags;
        match action {
            ItemAction::Take if flags.fixed => Err(DomainError::rejected(format!(
                "The {} will not budge.",
                self.name
            ))),
            ItemAction::Drop if flags.no_drop => Err(DomainError::rejected(format!(
                "You cannot let go of the {}.",
                self.name
            ))),
            ItemAction::Unequip if flags.cursed => Err(DomainError::rejected(format!(
                "The {} is cursed! You cannot remove it.",
                self.name
            ))),
            ItemAction::Equip if self.slot().is_none() => Err(DomainError::rejected(format!(
                "You cannot equip the {}.",
                self.name
            ))),
            ItemAction::Use
                if !self.category.is_consumable() && self.metadata.healing <= 0 =>
            {
                Err(DomainError::rejected(format!(
                    "You cannot use the {}.",
                    self.name
                )))
            }
            _ => Ok(()),
        }
    }
}

impl Named for Item {
    fn key(&self) -> &str {
        &self.template_id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duskhaven_content::domain::templates::ItemFlags;

    fn item_with(flags: ItemFlags, slot: Option<EquipSlot>, category: ItemCategory) -> Item {
        Item::from_template(&ItemTemplate {
            id: "thing".into(),
            name: "thing".into(),
            description: String::new(),
            category,
            metadata: ItemMetadata {
                slot,
                flags,
                ..ItemMetadata::default()
            },
        })
    }

    #[test]
    fn test_fixed_item_cannot_be_taken() {
        let item = item_with(
            ItemFlags {
                fixed: true,
                ..ItemFlags::default()
            },
            None,
            ItemCategory::Misc,
        );

        assert!(item.check(ItemAction::Take).is_err());
        assert!(item.check(ItemAction::Drop).is_ok());
    }

    #[test]
    fn test_no_drop_item_cannot_be_dropped() {
        let item = item_with(
            ItemFlags {
                no_drop: true,
                ..ItemFlags::default()
            },
            None,
            ItemCategory::Misc,
        );

        let err = item.check(ItemAction::Drop).unwrap_err();
        assert!(err.player_message().contains("thing"));
        assert!(item.check(ItemAction::Take).is_ok());
    }

    #[test]
    fn test_cursed_item_can_be_equipped_but_not_removed() {
        let item = item_with(
            ItemFlags {
                cursed: true,
                ..ItemFlags::default()
            },
            Some(EquipSlot::Ring),
            ItemCategory::Misc,
        );

        assert!(item.check(ItemAction::Equip).is_ok());
        assert!(item.check(ItemAction::Unequip).is_err());
    }

    #[test]
    fn test_item_without_slot_cannot_be_equipped() {
        let item = item_with(ItemFlags::default(), None, ItemCategory::Misc);
        assert!(item.check(ItemAction::Equip).is_err());
    }

    #[test]
    fn test_only_consumables_or_healing_items_can_be_used() {
        let potion = item_with(ItemFlags::default(), None, ItemCategory::Potion);
        let rock = item_with(ItemFlags::default(), None, ItemCategory::Misc);

        assert!(potion.check(ItemAction::Use).is_ok());
        assert!(rock.check(ItemAction::Use).is_err());
    }

    #[test]
    fn test_instances_of_one_template_are_independent() {
        let template = ItemTemplate {
            id: "apple".into(),
            name: "red apple".into(),
            description: String::new(),
            category: ItemCategory::Food,
            metadata: ItemMetadata::default(),
        };

        let a = Item::from_template(&template);
        let b = Item::from_template(&template);

        assert_ne!(a.id, b.id);
        assert_eq!(a.template_id, b.template_id);
    }
}
