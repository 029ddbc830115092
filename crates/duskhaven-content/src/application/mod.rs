//! Content-pack loading.

pub mod pack;
