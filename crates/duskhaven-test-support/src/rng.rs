//! Test RNG: deterministic `DeterministicRng` implementations for tests.

use duskhaven_core::rng::DeterministicRng;

/// A no-op RNG that always returns `min` for `next_u32_range` and `0.0` for
/// `next_f64`. Every damage roll therefore uses the low end of the variance.
#[derive(Debug)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_u32_range(&mut self, min: u32, _max: u32) -> u32 {
        min
    }

    fn next_f64(&mut self) -> f64 {
        0.0
    }
}

/// An RNG that returns values from a predetermined sequence. Panics if the
/// sequence is exhausted. Used for initiative rolls that must come out in a
/// particular order.
#[derive(Debug)]
pub struct SequenceRng {
    values: Vec<u32>,
    index: usize,
}

impl SequenceRng {
    /// Create a new `SequenceRng` with the given values.
    #[must_use]
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, index: 0 }
    }
}

impl DeterministicRng for SequenceRng {
    fn next_u32_range(&mut self, _min: u32, _max: u32) -> u32 {
        let val = self.values[self.index];
        self.index += 1;
        val
    }

    fn next_f64(&mut self) -> f64 {
        0.5
    }

    fn next_f64_range(&mut self, _min: f64, _max: f64) -> f64 {
        1.0
    }
}

/// An RNG with one fixed integer roll and one fixed range result. Damage rolls
/// return `factor` exactly, so formulas can be checked without float drift.
#[derive(Debug, Clone, Copy)]
pub struct FixedRng {
    roll: u32,
    factor: f64,
}

impl FixedRng {
    /// Every `next_u32_range` yields `roll` (clamped into range) and every
    /// `next_f64_range` yields `factor` (clamped into range).
    #[must_use]
    pub fn new(roll: u32, factor: f64) -> Self {
        Self { roll, factor }
    }
}

impl DeterministicRng for FixedRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        self.roll.clamp(min, max.max(min))
    }

    fn next_f64(&mut self) -> f64 {
        0.5
    }

    fn next_f64_range(&mut self, min: f64, max: f64) -> f64 {
        self.factor.clamp(min, max)
    }
}
