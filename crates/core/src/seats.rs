//! Seat allocation for freshly ingested workshops.
//!
//! Every ingested workshop starts with a uniformly random seat count drawn
//! from an inclusive range. A fixed seed makes the draw reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::CoreError;

/// Default lower bound of the initial seat range.
pub const DEFAULT_MIN_SEATS: i32 = 1;

/// Default upper bound of the initial seat range.
pub const DEFAULT_MAX_SEATS: i32 = 10;

/// Inclusive seat range plus optional RNG seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatPolicy {
    min: i32,
    max: i32,
    seed: Option<u64>,
}

impl Default for SeatPolicy {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_SEATS,
            max: DEFAULT_MAX_SEATS,
            seed: None,
        }
    }
}

impl SeatPolicy {
    /// Build a policy, rejecting negative bounds and inverted ranges.
    pub fn new(min: i32, max: i32, seed: Option<u64>) -> Result<Self, CoreError> {
        if min < 0 {
            return Err(CoreError::Validation(format!(
                "minimum seat count must not be negative, got {min}"
            )));
        }
        if min > max {
            return Err(CoreError::Validation(format!(
                "minimum seat count {min} exceeds maximum {max}"
            )));
        }
        Ok(Self { min, max, seed })
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Create the RNG used for one ingestion batch.
    ///
    /// Seeded policies restart from the same state on every batch.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    /// Draw an initial seat count in `[min, max]`.
    pub fn draw<R: Rng>(&self, rng: &mut R) -> i32 {
        rng.random_range(self.min..=self.max)
    }
}
