//! Injected randomness
//!
//! Every random draw in the simulation goes through `RandomSource`, so a
//! session seeded with the same value replays identically.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Source of uniform random samples
pub trait RandomSource {
    /// Uniform in [lo, hi)
    fn range_f32(&mut self, lo: f32, hi: f32) -> f32;

    /// Uniform integer in [lo, hi] (inclusive)
    fn range_i32(&mut self, lo: i32, hi: i32) -> i32;

    /// Uniform index in [0, len)
    fn index(&mut self, len: usize) -> usize;

    /// True with probability `p`
    fn chance(&mut self, p: f64) -> bool;

    /// Uniform choice from a non-empty slice
    fn pick<T: Copy>(&mut self, items: &[T]) -> T
    where
        Self: Sized,
    {
        items[self.index(items.len())]
    }

    /// -1 or +1 with equal odds
    fn sign(&mut self) -> f32
    where
        Self: Sized,
    {
        if self.chance(0.5) { 1.0 } else { -1.0 }
    }
}

/// Seeded PCG generator owned by a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimRng {
    seed: u64,
    inner: Pcg32,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            inner: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed this generator was created from
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SimRng {
    fn range_f32(&mut self, lo: f32, hi: f32) -> f32 {
        if hi <= lo {
            return lo;
        }
        self.inner.random_range(lo..hi)
    }

    fn range_i32(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        self.inner.random_range(lo..=hi)
    }

    fn index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.inner.random_range(0..len)
    }

    fn chance(&mut self, p: f64) -> bool {
        self.inner.random_bool(p.clamp(0.0, 1.0))
    }
}

/// Replays scripted samples; used to pin down individual branches in tests
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub(crate) struct ScriptedRng {
    /// Values in [0, 1) consumed in order, cycling when exhausted
    pub samples: Vec<f32>,
    cursor: usize,
}

#[cfg(test)]
impl ScriptedRng {
    pub fn new(samples: Vec<f32>) -> Self {
        Self { samples, cursor: 0 }
    }

    fn next(&mut self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let v = self.samples[self.cursor % self.samples.len()];
        self.cursor += 1;
        v
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRng {
    fn range_f32(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next()
    }

    fn range_i32(&mut self, lo: i32, hi: i32) -> i32 {
        let span = (hi - lo + 1) as f32;
        (lo + (self.next() * span) as i32).min(hi)
    }

    fn index(&mut self, len: usize) -> usize {
        ((self.next() * len as f32) as usize).min(len.saturating_sub(1))
    }

    fn chance(&mut self, p: f64) -> bool {
        (self.next() as f64) < p
    }
}
