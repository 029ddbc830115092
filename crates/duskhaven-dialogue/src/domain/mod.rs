//! Domain types for the Dialogue context.

pub mod conversation;
pub mod state;
