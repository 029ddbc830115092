//! Domain types for the World context.

pub mod direction;
pub mod graph;
pub mod location;
pub mod mobile;
pub mod registry;
