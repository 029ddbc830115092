//! Duskhaven: Engine
//!
//! The `GameWorld` context: registries, the virtual-time task queue, the
//! outbox, and every verb operation a session can issue.

pub mod application;
pub mod domain;
