//! Duskhaven: Character context.
//!
//! The durable player-controlled `Actor`, its stored record format, the
//! repair rules applied on every returning login, and the persistence
//! gateway that writes records without blocking gameplay.

pub mod application;
pub mod domain;
