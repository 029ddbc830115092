//! Duskhaven: Dialogue context.
//!
//! Per-(actor, mobile) conversation state over the node graphs carried by
//! mobile templates. Timing of follow-up nodes is left to the engine.

pub mod domain;
