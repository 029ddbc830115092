//! Backing stores for durable world records.
//!
//! Both implement `duskhaven_core::store::StateStore`. The server picks the
//! PostgreSQL store when a database URL is configured and the in-memory
//! store otherwise.

pub mod memory;
pub mod pg_state_store;
pub mod schema;
