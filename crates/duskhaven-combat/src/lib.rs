//! Duskhaven: Combat context.
//!
//! Vital attributes and base stats, the `Combatant` capability shared by
//! actors and mobiles, encounter state, and the initiative and damage rules.
//! Scheduling of follow-up turns lives in the engine.

pub mod domain;
