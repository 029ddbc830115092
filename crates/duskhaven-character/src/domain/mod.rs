//! Domain types for the Character context.

pub mod actor;
pub mod record;
pub mod restore;
