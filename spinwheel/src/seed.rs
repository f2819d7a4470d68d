//! Seeding of the simulation generators.
//!
//! Each thread seeds a single source from the clock on first use. Every engine built on that
//! thread takes the next value from the source, so engines constructed in quick succession
//! still run uncorrelated simulations. Supply a seeded generator directly for reproducibility.

use std::cell::RefCell;
use tinyrand::{Rand, Seeded, StdRand};
use tinyrand_std::ClockSeed;

thread_local! {
    static SOURCE: RefCell<StdRand> = RefCell::new(StdRand::seed(ClockSeed::default().next_u64()));
}

pub fn next_seed() -> u64 {
    SOURCE.with(|source| source.borrow_mut().next_u64())
}

/// A generator seeded from the thread's seed source.
pub fn seeded_rand() -> StdRand {
    StdRand::seed(next_seed())
}
