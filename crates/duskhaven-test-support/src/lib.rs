//! Shared test mocks and fixtures for the Duskhaven world engine.

mod clock;
mod content;
mod rng;
mod store;

pub use clock::FixedClock;
pub use content::{SAMPLE_PACK_YAML, sample_pack};
pub use rng::{FixedRng, MockRng, SequenceRng};
pub use store::{EmptyStateStore, FailingStateStore, RecordingStateStore};
