//! Winner selection and the injectable random source.
//!
//! Randomness enters the crate only here and in landing-wedge choice
//! ([`crate::rotation`]). Both take a [`RandomSource`] so tests can drive
//! them with a fixed sequence instead of a real generator.

#[cfg(test)]
#[path = "select_test.rs"]
mod select_test;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::participant::Participant;
use crate::pool::Pool;

/// Uniform index draws.
pub trait RandomSource {
    /// Draw an index uniformly from `[0, len)`. Callers never pass `len == 0`.
    fn index(&mut self, len: usize) -> usize;
}

/// Adapter from any [`rand::Rng`] to [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl RngSource<StdRng> {
    /// Seeded from the operating system.
    #[must_use]
    pub fn from_os() -> Self {
        Self(StdRng::from_os_rng())
    }

    /// Reproducible sequence for a given seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn index(&mut self, len: usize) -> usize {
        self.0.random_range(0..len)
    }
}

/// Draw one slot uniformly and return its participant, or `None` for an empty pool.
pub fn select_winner<'a, R>(pool: &Pool<'a>, rng: &mut R) -> Option<&'a Participant>
where
    R: RandomSource + ?Sized,
{
    if pool.is_empty() {
        return None;
    }
    let index = rng.index(pool.len());
    pool.get(index).map(|slot| slot.participant)
}
