//! Duskhaven: World context.
//!
//! The location graph with its exits and contents, live mobile instances,
//! and the registry that instantiates items and mobiles from templates.

pub mod application;
pub mod domain;
