//! Duskhaven: World Content context.
//!
//! Immutable template records for rooms, items, mobiles and dialogue trees,
//! plus loading and validation of YAML content packs.

pub mod application;
pub mod domain;
