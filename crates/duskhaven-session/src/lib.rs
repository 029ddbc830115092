//! Duskhaven: Session context.
//!
//! Live connections, the character-name rules, and the registry that keeps
//! at most one session bound to each actor name.

pub mod domain;
