//! Application layer for the engine: the `GameWorld` and its operations.

pub mod combat;
pub mod conversation;
pub mod items;
pub mod movement;
pub mod sessions;
pub mod social;
pub mod world;
