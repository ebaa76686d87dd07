//! Random draws that steer the cars.
//!
//! Target selection and the dwell roll both go through [`RandomSource`], so
//! the controller never reaches for `rand::thread_rng()` directly and a run
//! can be replayed from its seed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A source of uniform draws in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

/// Seeded production source.
pub struct SimRng(ChaCha8Rng);

impl SimRng {
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(ChaCha8Rng::from_entropy())
    }
}

impl RandomSource for SimRng {
    fn next_unit(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

/// Draws the next target as `round(u * n_floors)`, which covers
/// `0..=n_floors`. With `visible_floors_only` the top line is excluded and the
/// draw covers `0..n_floors`.
pub fn draw_target_floor<R: RandomSource + ?Sized>(
    rng: &mut R,
    n_floors: u32,
    visible_floors_only: bool,
) -> i32 {
    let top = if visible_floors_only {
        n_floors.saturating_sub(1)
    } else {
        n_floors
    };
    (rng.next_unit() * top as f64).round() as i32
}

/// Per-tick Bernoulli roll.
pub fn roll<R: RandomSource + ?Sized>(rng: &mut R, probability: f64) -> bool {
    rng.next_unit() < probability
}

/// Replays a fixed list of draws, cycling when it runs out.
#[cfg(test)]
pub struct ScriptedSource {
    values: Vec<f64>,
    index: usize,
}

#[cfg(test)]
impl ScriptedSource {
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty());
        Self { values, index: 0 }
    }

    /// A source whose draws never pass a dwell roll.
    pub fn never() -> Self {
        Self::new(vec![0.999])
    }

    pub fn draws(&self) -> usize {
        self.index
    }
}

#[cfg(test)]
impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        let value = self.values[self.index % self.values.len()];
        self.index += 1;
        value
    }
}
