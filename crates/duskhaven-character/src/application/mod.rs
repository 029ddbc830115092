//! Application services for the Character context.

pub mod persistence;
