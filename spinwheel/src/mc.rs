//! Monte Carlo estimation of collection queries: the chance that a bounded run of draws
//! contains every prize of a [Collection], and the number of draws it takes to complete one.
//! Under non-uniform weights neither has a tractable closed form.

use anyhow::bail;
use serde::{Deserialize, Serialize};
use tinyrand::{Rand, StdRand};

use crate::capture::{Capture, CaptureMut};
use crate::collection::Collection;
use crate::probs::Fraction;

pub const DEFAULT_WITHIN_TRIALS: u64 = 100_000;
pub const DEFAULT_COLLECTION_TRIALS: u64 = 10_000;
pub const DEFAULT_DRAW_CAP: u64 = 1_000;

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Simulated runs per bounded-draws estimate.
    pub within_trials: u64,
    /// Simulated runs per draws-to-collect estimate.
    pub collection_trials: u64,
    /// Draws after which a single draws-to-collect run is abandoned.
    pub draw_cap: u64,
}
impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            within_trials: DEFAULT_WITHIN_TRIALS,
            collection_trials: DEFAULT_COLLECTION_TRIALS,
            draw_cap: DEFAULT_DRAW_CAP,
        }
    }
}
impl SimulationConfig {
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.within_trials == 0 || self.collection_trials == 0 {
            bail!("at least one simulation trial must be specified");
        }
        if self.draw_cap == 0 {
            bail!("draw cap must be positive");
        }
        Ok(())
    }
}

/// Outcome of a draws-to-collect simulation.
///
/// Runs that reach the draw cap contribute the cap to the mean, so `mean_draws` underestimates
/// the true expectation whenever `capped` is nonzero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionEstimate {
    pub trials: u64,
    pub mean_draws: f64,
    pub capped: u64,
}
impl CollectionEstimate {
    pub fn is_biased(&self) -> bool {
        self.capped > 0
    }
}

/// Draws a single prize, given the running sums of the draw probabilities.
#[inline(always)]
pub fn draw(cumulative: &[f64], rand: &mut impl Rand) -> usize {
    debug_assert!(!cumulative.is_empty());
    let random = random_f64(rand);
    for (index, &bound) in cumulative.iter().enumerate() {
        if random < bound {
            return index;
        }
    }
    last_reachable(cumulative)
}

/// A single bounded run. Returns `true` if every prize in the collection was drawn within
/// `draws` attempts.
pub fn run_within(
    cumulative: &[f64],
    draws: u64,
    collection: &Collection,
    bitmap: &mut [bool],
    rand: &mut impl Rand,
) -> bool {
    debug_assert_eq!(cumulative.len(), bitmap.len());
    let mut outstanding = collection.mark(bitmap);
    if outstanding == 0 {
        return true;
    }
    for _ in 0..draws {
        let index = draw(cumulative, rand);
        if bitmap[index] {
            bitmap[index] = false;
            outstanding -= 1;
            if outstanding == 0 {
                return true;
            }
        }
    }
    false
}

/// A single open-ended run. Returns the number of draws it took to complete the collection,
/// or `None` if the collection was still incomplete after `draw_cap` draws.
pub fn run_until(
    cumulative: &[f64],
    draw_cap: u64,
    collection: &Collection,
    bitmap: &mut [bool],
    rand: &mut impl Rand,
) -> Option<u64> {
    debug_assert_eq!(cumulative.len(), bitmap.len());
    let mut outstanding = collection.mark(bitmap);
    if outstanding == 0 {
        return Some(0);
    }
    for draws in 1..=draw_cap {
        let index = draw(cumulative, rand);
        if bitmap[index] {
            bitmap[index] = false;
            outstanding -= 1;
            if outstanding == 0 {
                return Some(draws);
            }
        }
    }
    None
}

pub struct MonteCarloEngine<'a, R: Rand> {
    trials: u64,
    draw_cap: u64,
    cumulative: Capture<'a, Vec<f64>, [f64]>,
    bitmap: CaptureMut<'a, Vec<bool>, [bool]>,
    rand: CaptureMut<'a, R>,
}

impl Default for MonteCarloEngine<'_, StdRand> {
    fn default() -> Self {
        Self {
            trials: DEFAULT_WITHIN_TRIALS,
            draw_cap: DEFAULT_DRAW_CAP,
            cumulative: Capture::default(),
            bitmap: CaptureMut::default(),
            rand: CaptureMut::Owned(StdRand::default()),
        }
    }
}

impl<'a, R: Rand> MonteCarloEngine<'a, R> {
    pub fn with_trials(mut self, trials: u64) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_draw_cap(mut self, draw_cap: u64) -> Self {
        self.draw_cap = draw_cap;
        self
    }

    pub fn with_cumulative(mut self, cumulative: Capture<'a, Vec<f64>, [f64]>) -> Self {
        self.cumulative = cumulative;
        self
    }

    pub fn with_bitmap(mut self, bitmap: CaptureMut<'a, Vec<bool>, [bool]>) -> Self {
        self.bitmap = bitmap;
        self
    }

    pub fn with_rand<S: Rand>(self, rand: CaptureMut<'a, S>) -> MonteCarloEngine<'a, S> {
        MonteCarloEngine {
            trials: self.trials,
            draw_cap: self.draw_cap,
            cumulative: self.cumulative,
            bitmap: self.bitmap,
            rand,
        }
    }

    /// Estimates the probability of completing the collection within `draws` draws. Returns
    /// a zero tally without simulating if completion is impossible: fewer draws than
    /// outstanding prizes, or an outstanding prize that cannot be drawn.
    pub fn simulate_within(&mut self, collection: &Collection, draws: u64) -> Fraction {
        self.ensure_bitmap();
        let outstanding = collection.mark(&mut self.bitmap);
        if (draws as usize) < outstanding || !self.all_reachable() {
            return Fraction {
                numerator: 0,
                denominator: self.trials,
            };
        }

        let mut successes = 0;
        for _ in 0..self.trials {
            if run_within(
                &self.cumulative,
                draws,
                collection,
                &mut self.bitmap,
                &mut *self.rand,
            ) {
                successes += 1;
            }
        }
        Fraction {
            numerator: successes,
            denominator: self.trials,
        }
    }

    /// Estimates the mean number of draws needed to complete the collection.
    pub fn simulate_until(&mut self, collection: &Collection) -> CollectionEstimate {
        self.ensure_bitmap();
        collection.mark(&mut self.bitmap);
        if !self.all_reachable() {
            return CollectionEstimate {
                trials: self.trials,
                mean_draws: self.draw_cap as f64,
                capped: self.trials,
            };
        }

        let (mut total_draws, mut capped) = (0, 0);
        for _ in 0..self.trials {
            match run_until(
                &self.cumulative,
                self.draw_cap,
                collection,
                &mut self.bitmap,
                &mut *self.rand,
            ) {
                Some(draws) => total_draws += draws,
                None => {
                    total_draws += self.draw_cap;
                    capped += 1;
                }
            }
        }
        CollectionEstimate {
            trials: self.trials,
            mean_draws: if self.trials == 0 {
                0.0
            } else {
                total_draws as f64 / self.trials as f64
            },
            capped,
        }
    }

    fn ensure_bitmap(&mut self) {
        if self.bitmap.len() != self.cumulative.len() {
            self.bitmap = CaptureMut::Owned(vec![false; self.cumulative.len()]);
        }
    }

    /// Whether every prize flagged in the bitmap has a nonzero draw probability.
    fn all_reachable(&self) -> bool {
        self.bitmap
            .iter()
            .enumerate()
            .filter(|&(_, &outstanding)| outstanding)
            .all(|(index, _)| is_reachable(&self.cumulative, index))
    }
}

#[inline]
fn is_reachable(cumulative: &[f64], index: usize) -> bool {
    let floor = if index == 0 { 0.0 } else { cumulative[index - 1] };
    cumulative[index] > floor
}

/// The last prize with a nonzero probability. Catches uniform values that fall above a
/// running sum that rounded to slightly below 1.
#[cold]
fn last_reachable(cumulative: &[f64]) -> usize {
    let total = cumulative[cumulative.len() - 1];
    cumulative
        .iter()
        .position(|&bound| bound >= total)
        .unwrap_or(cumulative.len() - 1)
}

/// Uniform in [0, 1), from the top 53 bits of the generator output.
#[inline(always)]
fn random_f64(rand: &mut impl Rand) -> f64 {
    (rand.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}

#[cfg(test)]
mod tests;
