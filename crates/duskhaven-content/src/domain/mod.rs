//! Template records.

pub mod dialogue;
pub mod templates;
