//! Capacity-limited, insertion-ordered item containers.

use duskhaven_core::error::DomainError;
use duskhaven_core::lookup::resolve;
use serde::{Deserialize, Serialize};

use super::item::{Item, ItemAction};

/// Capacity caps applied to every actor inventory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InventoryLimits {
    /// Maximum number of carried items.
    pub max_items: usize,
    /// Maximum total carried weight.
    pub max_weight: f64,
}

impl Default for InventoryLimits {
    fn default() -> Self {
        Self {
            max_items: 20,
            max_weight: 100.0,
        }
    }
}

/// Items carried by an actor, in the order they were acquired.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    /// Creates an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an inventory from already-owned items.
    #[must_use]
    pub fn from_items(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// Carried items in acquisition order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of the weights of all carried items.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.items.iter().map(Item::weight).sum()
    }

    /// Whether the count cap has been reached.
    #[must_use]
    pub fn is_full(&self, limits: &InventoryLimits) -> bool {
        self.items.len() >= limits.max_items
    }

    /// Finds an item by the shared lookup policy.
    #[must_use]
    pub fn find(&self, query: &str) -> Option<&Item> {
        resolve(&self.items, query).map(|index| &self.items[index])
    }

    /// Checks both caps for one more item.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Rejected` if the count or weight cap would be exceeded.
    pub fn ensure_room_for(&self, item: &Item, limits: &InventoryLimits) -> Result<(), DomainError> {
        if self.is_full(limits) {
            return Err(DomainError::rejected("You can't carry any more items."));
        }
        if self.total_weight() + item.weight() > limits.max_weight {
            return Err(DomainError::rejected("That is too heavy for you to carry."));
        }
        Ok(())
    }

    /// Appends without any cap check. Used for restored records and gifts
    /// that must never be lost.
    pub fn push(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Removes and returns the first item matching `query`.
    pub fn remove(&mut self, query: &str) -> Option<Item> {
        resolve(&self.items, query).map(|index| self.items.remove(index))
    }
}

/// Moves an item matching `query` out of a location's item list into `inventory`.
///
/// # Errors
///
/// Returns `DomainError::Rejected` if nothing matches, the inventory is full,
/// the item is too heavy, or the item is fixed in place. The source is left
/// untouched on error.
pub fn take_from(
    source: &mut Vec<Item>,
    inventory: &mut Inventory,
    query: &str,
    limits: &InventoryLimits,
) -> Result<Item, DomainError> {
    let index =
        resolve(source, query).ok_or_else(|| DomainError::rejected("You don't see that here."))?;
    let candidate = &source[index];
    inventory.ensure_room_for(candidate, limits)?;
    candidate.check(ItemAction::Take)?;

    let item = source.remove(index);
    inventory.push(item.clone());
    Ok(item)
}

/// Moves an item matching `query` out of `inventory` onto a location's item list.
///
/// # Errors
///
/// Returns `DomainError::Rejected` if nothing matches or the item may not be dropped.
pub fn drop_into(
    inventory: &mut Inventory,
    destination: &mut Vec<Item>,
    query: &str,
) -> Result<Item, DomainError> {
    let index = resolve(&inventory.items, query)
        .ok_or_else(|| DomainError::rejected("You aren't carrying that."))?;
    inventory.items[index].check(ItemAction::Drop)?;

    let item = inventory.items.remove(index);
    destination.push(item.clone());
    Ok(item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use duskhaven_content::domain::templates::{
        ItemCategory, ItemFlags, ItemMetadata, ItemTemplate,
    };

    fn item(id: &str, name: &str, weight: f64, flags: ItemFlags) -> Item {
        Item::from_template(&ItemTemplate {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            category: ItemCategory::Misc,
            metadata: ItemMetadata {
                weight,
                flags,
                ..ItemMetadata::default()
            },
        })
    }

    #[test]
    fn test_take_moves_item_from_location_to_inventory() {
        // Arrange
        let mut floor = vec![item("sword", "rusty sword", 5.0, ItemFlags::default())];
        let mut inventory = Inventory::new();

        // Act
        let taken = take_from(&mut floor, &mut inventory, "sword", &InventoryLimits::default())
            .unwrap();

        // Assert
        assert_eq!(taken.name, "rusty sword");
        assert!(floor.is_empty());
        assert_eq!(inventory.len(), 1);
    }

    #[test]
    fn test_take_missing_item_is_rejected() {
        let mut floor = Vec::new();
        let mut inventory = Inventory::new();

        let err = take_from(&mut floor, &mut inventory, "sword", &InventoryLimits::default())
            .unwrap_err();

        assert_eq!(err.player_message(), "You don't see that here.");
    }

    #[test]
    fn test_take_rejected_at_item_count_cap() {
        // Arrange
        let limits = InventoryLimits {
            max_items: 1,
            max_weight: 100.0,
        };
        let mut inventory =
            Inventory::from_items(vec![item("rock", "rock", 1.0, ItemFlags::default())]);
        let mut floor = vec![item("gem", "gem", 0.1, ItemFlags::default())];

        // Act
        let err = take_from(&mut floor, &mut inventory, "gem", &limits).unwrap_err();

        // Assert
        assert_eq!(err.player_message(), "You can't carry any more items.");
        assert_eq!(floor.len(), 1);
        assert_eq!(inventory.len(), 1);
    }

    #[test]
    fn test_take_rejected_when_weight_would_exceed_cap() {
        let mut inventory =
            Inventory::from_items(vec![item("anvil", "anvil", 95.0, ItemFlags::default())]);
        let mut floor = vec![item("brick", "brick", 6.0, ItemFlags::default())];

        let err = take_from(&mut floor, &mut inventory, "brick", &InventoryLimits::default())
            .unwrap_err();

        assert_eq!(err.player_message(), "That is too heavy for you to carry.");
        assert_eq!(floor.len(), 1);
    }

    #[test]
    fn test_take_exactly_at_weight_cap_is_allowed() {
        let mut inventory =
            Inventory::from_items(vec![item("anvil", "anvil", 95.0, ItemFlags::default())]);
        let mut floor = vec![item("brick", "brick", 5.0, ItemFlags::default())];

        let result = take_from(&mut floor, &mut inventory, "brick", &InventoryLimits::default());

        assert!(result.is_ok());
        assert!((inventory.total_weight() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_take_fixed_item_is_rejected_and_stays_put() {
        let fixed = ItemFlags {
            fixed: true,
            ..ItemFlags::default()
        };
        let mut floor = vec![item("altar", "stone altar", 500.0, fixed)];
        let mut inventory = Inventory::new();
        let limits = InventoryLimits {
            max_items: 20,
            max_weight: 1000.0,
        };

        let err = take_from(&mut floor, &mut inventory, "altar", &limits).unwrap_err();

        assert_eq!(err.player_message(), "The stone altar will not budge.");
        assert_eq!(floor.len(), 1);
        assert!(inventory.is_empty());
    }

    #[test]
    fn test_drop_nodrop_item_fails_and_stays_in_inventory() {
        // Arrange
        let nodrop = ItemFlags {
            no_drop: true,
            ..ItemFlags::default()
        };
        let mut inventory =
            Inventory::from_items(vec![item("amulet", "bound amulet", 0.5, nodrop)]);
        let mut floor = Vec::new();

        // Act
        let result = drop_into(&mut inventory, &mut floor, "amulet");

        // Assert
        assert!(result.is_err());
        assert_eq!(inventory.len(), 1);
        assert!(floor.is_empty());
    }

    #[test]
    fn test_drop_moves_item_to_location() {
        let mut inventory =
            Inventory::from_items(vec![item("apple", "red apple", 0.2, ItemFlags::default())]);
        let mut floor = Vec::new();

        let dropped = drop_into(&mut inventory, &mut floor, "apple").unwrap();

        assert_eq!(dropped.name, "red apple");
        assert!(inventory.is_empty());
        assert_eq!(floor.len(), 1);
    }

    #[test]
    fn test_drop_first_substring_match_wins() {
        let mut inventory = Inventory::from_items(vec![
            item("bread-a", "stale bread", 0.2, ItemFlags::default()),
            item("bread-b", "fresh bread", 0.2, ItemFlags::default()),
        ]);
        let mut floor = Vec::new();

        let dropped = drop_into(&mut inventory, &mut floor, "bread").unwrap();

        assert_eq!(dropped.name, "stale bread");
    }
}
