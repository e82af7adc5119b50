//! Value generation for newly appended columns.
//!
//! Base value: `column * N + row`. Variants add, never replace:
//! - `Plain`: the base value.
//! - `Noise`: base + trigonometric noise, then a Fibonacci-derived term and
//!   `value % 7` to break up repeating runs.
//! - `Randomized`: base + seed-shifted noise + `floor(bias * 100)` with the
//!   bias uniform in `[-0.2, 0.2)`. The seed is re-rolled periodically.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::grid::{edge_neighbors, PixelField};
use super::random::RandomSource;

/// Spatial frequency of the column/row noise field.
const NOISE_FREQUENCY: f64 = 0.05;
/// Amplitude of the column/row noise field.
const NOISE_AMPLITUDE: f64 = 100.0;
/// Seeds are drawn uniformly from `[0, SEED_RANGE)`.
pub const SEED_RANGE: f64 = 1000.0;

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GeneratorVariant {
    Plain,
    /// `seeded` shifts the noise field by the current seed.
    Noise { seeded: bool },
    Randomized,
}

impl GeneratorVariant {
    /// Whether this variant reads a noise seed at all.
    pub fn uses_seed(self) -> bool {
        matches!(
            self,
            GeneratorVariant::Noise { seeded: true } | GeneratorVariant::Randomized
        )
    }
}

/// `sin((x + seed) * 0.05) * cos((y + seed) * 0.05) * 100`, seed 0 when absent.
pub fn noise(x: f64, y: f64, seed: Option<f64>) -> f64 {
    let shift = seed.unwrap_or(0.0);
    ((x + shift) * NOISE_FREQUENCY).sin() * ((y + shift) * NOISE_FREQUENCY).cos() * NOISE_AMPLITUDE
}

/// Run the Fibonacci recurrence (a=0, b=1) for `n % 10` steps and return
/// the last sum mod 10. Negative `n` runs zero steps.
pub fn fibonacci_mod(n: i64) -> i64 {
    let (mut a, mut b, mut sum) = (0i64, 1i64, 0i64);
    for _ in 0..n % 10 {
        sum = a + b;
        a = b;
        b = sum;
    }
    sum % 10
}

/// Uniform bias in `[-0.2, 0.2)`.
#[inline]
pub fn random_bias(rng: &mut dyn RandomSource) -> f64 {
    rng.next_uniform() * 0.4 - 0.2
}

/// Produces new cell values and owns the noise seed.
#[derive(Clone, Debug)]
pub struct ValueGenerator {
    pub variant: GeneratorVariant,
    seed: Option<f64>,
    reseed_every: u64,
}

impl ValueGenerator {
    /// `seed` is only kept for variants that read it; a seeded variant
    /// without an explicit seed draws one from `rng`.
    pub fn new(
        variant: GeneratorVariant,
        seed: Option<f64>,
        reseed_every: u64,
        rng: &mut dyn RandomSource,
    ) -> Self {
        let seed = if variant.uses_seed() {
            Some(seed.unwrap_or_else(|| rng.next_uniform() * SEED_RANGE))
        } else {
            None
        };
        Self {
            variant,
            seed,
            reseed_every,
        }
    }

    /// The current noise seed, if this variant uses one.
    pub fn seed(&self) -> Option<f64> {
        self.seed
    }

    /// Value for `(row, column)` in a field with `size` rows.
    ///
    /// `edge` holds the pre-scroll rightmost neighbors of `row`. None of the
    /// shipped variants fold them into the value yet.
    pub fn generate(
        &self,
        column: u64,
        row: usize,
        size: usize,
        edge: &[i64],
        rng: &mut dyn RandomSource,
    ) -> i64 {
        debug_assert!(edge.len() <= 3);
        let base = column as i64 * size as i64 + row as i64;

        match self.variant {
            GeneratorVariant::Plain => base,
            GeneratorVariant::Noise { .. } => {
                let value = base + noise(column as f64, row as f64, self.seed).floor() as i64;
                value + fibonacci_mod(value) + value % 7
            }
            GeneratorVariant::Randomized => {
                let value = base + noise(column as f64, row as f64, self.seed).floor() as i64;
                value + (random_bias(rng) * 100.0).floor() as i64
            }
        }
    }

    /// Build the next column for `field`, top to bottom.
    pub fn next_column(&self, field: &PixelField, rng: &mut dyn RandomSource) -> Vec<i64> {
        (0..field.height)
            .map(|row| {
                let edge = edge_neighbors(field, row);
                self.generate(field.generation, row, field.height, edge.as_slice(), rng)
            })
            .collect()
    }

    /// Re-roll the seed when `generation` lands on the reseed interval.
    /// Only the randomized variant re-rolls. Returns whether it did.
    pub fn maybe_reseed(&mut self, generation: u64, rng: &mut dyn RandomSource) -> bool {
        if self.variant != GeneratorVariant::Randomized
            || self.reseed_every == 0
            || generation == 0
            || generation % self.reseed_every != 0
        {
            return false;
        }
        let seed = rng.next_uniform() * SEED_RANGE;
        debug!(generation, seed, "noise seed re-rolled");
        self.seed = Some(seed);
        true
    }
}
