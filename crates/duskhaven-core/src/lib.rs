//! Duskhaven Core: shared abstractions.
//!
//! This crate defines the identifiers, traits and small runtime pieces that
//! every bounded context depends on: time, randomness, errors, the durable
//! backing store, and the virtual-time task scheduler. It contains no
//! infrastructure code.

pub mod clock;
pub mod error;
pub mod ids;
pub mod lookup;
pub mod rng;
pub mod scheduler;
pub mod store;
