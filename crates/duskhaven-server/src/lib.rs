//! Duskhaven server library: everything `main.rs` wires together, exposed
//! so integration tests can build the same pieces.

pub mod bridge;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod routes;
pub mod runtime;
pub mod state;
