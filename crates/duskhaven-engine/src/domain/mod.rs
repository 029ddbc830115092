//! Domain layer for the engine.

pub mod config;
pub mod outbox;
pub mod task;
