#![forbid(unsafe_code)]

//! Random sources for candidate sampling.
//!
//! The solver only ever asks for uniform values in `[0, 1)`. Production code
//! wraps a `rand` generator in [`RngSource`]; tests that need exact control
//! over which candidates are drawn use [`SequenceSource`].

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Supplier of uniform samples in `[0, 1)`.
pub trait RandomSource {
    /// Next uniform sample in `[0, 1)`.
    fn next_unit(&mut self) -> f32;
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn next_unit(&mut self) -> f32 {
        (**self).next_unit()
    }
}

/// Adapter from any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R = SmallRng> {
    rng: R,
}

impl RngSource<SmallRng> {
    /// Small fast generator seeded from the operating system.
    #[must_use]
    pub fn from_os_rng() -> Self {
        Self::new(SmallRng::from_os_rng())
    }

    /// Small fast generator with a fixed seed (reproducible runs).
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R> RngSource<R> {
    /// Wrap an existing generator.
    #[must_use]
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

/// Replays a fixed list of samples, cycling when exhausted.
///
/// Values are clamped into `[0, 1)`; an empty list always yields `0.0`.
#[derive(Debug, Clone, Default)]
pub struct SequenceSource {
    values: Vec<f32>,
    cursor: usize,
}

impl SequenceSource {
    /// Create a source replaying `values`.
    #[must_use]
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Number of samples drawn so far.
    #[must_use]
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f32 {
        if self.values.is_empty() {
            self.cursor += 1;
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value.clamp(0.0, 1.0 - f32::EPSILON)
    }
}
