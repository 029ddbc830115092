//! Domain types for the Session context.

pub mod name;
pub mod registry;
pub mod session;
