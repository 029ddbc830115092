//! Domain types for the Inventory & Equipment context.

pub mod equipment;
pub mod inventory;
pub mod item;
