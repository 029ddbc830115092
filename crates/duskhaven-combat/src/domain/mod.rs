//! Domain types for the Combat context.

pub mod attributes;
pub mod combatant;
pub mod rules;
pub mod state;
