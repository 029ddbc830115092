//! Duskhaven: Inventory & Equipment context.
//!
//! Item instances, the single item capability check, capacity-limited
//! inventories, and one-item-per-slot equipment.

pub mod domain;
