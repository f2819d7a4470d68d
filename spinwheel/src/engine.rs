//! The [ProbabilityEngine] answers questions about repeated spins over a ranked [Distribution].
//!
//! Single-prize questions have closed forms: each spin is an independent draw, with replacement,
//! from a fixed distribution, so the number of spins to the first hit is geometric and the
//! number of hits in a fixed run is binomial. Questions about collecting several prizes are
//! delegated to the [Monte Carlo](crate::mc) estimators.

use serde::{Deserialize, Serialize};
use tinyrand::{Rand, StdRand};
use tracing::{debug, trace};

use crate::capture::{Capture, CaptureMut};
use crate::collection::Collection;
use crate::comb::ln_binomial;
use crate::error::{InvalidInput, UnreachablePrize};
use crate::mc::{CollectionEstimate, MonteCarloEngine, SimulationConfig};
use crate::prize::Prize;
use crate::seed;
use crate::timed::Timed;
use crate::weight::{Distribution, WeightRanker};

/// The chance of drawing a prize within a given number of spins, and what those spins cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub trials: u64,
    pub probability: f64,
    pub cost: f64,
}

/// Expected outlay for winning a prize against the prize's value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profitability {
    pub expected_trials: f64,
    pub expected_cost: f64,
    pub value: f64,
    pub profit: f64,
    pub profit_ratio: f64,
}

pub struct ProbabilityEngine<R: Rand = StdRand> {
    distribution: Distribution,
    simulation: SimulationConfig,
    rand: R,
}

impl ProbabilityEngine<StdRand> {
    /// Ranks the prizes with the default weighting and seeds a generator from the thread's
    /// seed source.
    pub fn new(
        prizes: impl IntoIterator<Item = Prize>,
        trial_price: f64,
    ) -> Result<Self, InvalidInput> {
        let distribution = WeightRanker::default().rank(prizes, trial_price)?;
        Ok(Self::from_distribution(distribution, seed::seeded_rand()))
    }
}

impl<R: Rand> ProbabilityEngine<R> {
    pub fn from_distribution(distribution: Distribution, rand: R) -> Self {
        Self {
            distribution,
            simulation: SimulationConfig::default(),
            rand,
        }
    }

    pub fn with_rand<S: Rand>(self, rand: S) -> ProbabilityEngine<S> {
        ProbabilityEngine {
            distribution: self.distribution,
            simulation: self.simulation,
            rand,
        }
    }

    pub fn with_simulation(mut self, simulation: SimulationConfig) -> Result<Self, anyhow::Error> {
        simulation.validate()?;
        self.simulation = simulation;
        Ok(self)
    }

    pub fn distribution(&self) -> &Distribution {
        &self.distribution
    }

    pub fn simulation(&self) -> &SimulationConfig {
        &self.simulation
    }

    /// Single-spin probability of the named prize; zero if there is no such prize.
    pub fn probability_of(&self, name: &str) -> f64 {
        self.distribution
            .get(name)
            .map_or(0.0, |prize| prize.probability)
    }

    /// Probability of drawing the named prize at least once in `trials` spins:
    /// `1 - (1 - p)^trials`, evaluated as `-expm1(trials × ln(1 - p))` to keep precision when
    /// `p` is small.
    pub fn probability_within_trials(&self, name: &str, trials: u64) -> f64 {
        let probability = self.probability_of(name);
        if probability == 0.0 || trials == 0 {
            return 0.0;
        }
        -(trials as f64 * (-probability).ln_1p()).exp_m1()
    }

    /// Mean number of spins to the first draw of the named prize.
    pub fn expected_trials_for(&self, name: &str) -> Result<f64, UnreachablePrize> {
        let probability = self.probability_of(name);
        if probability == 0.0 {
            return Err(UnreachablePrize(name.into()));
        }
        Ok(1.0 / probability)
    }

    /// Probability that the named prize is drawn exactly `hits` times in `trials` spins.
    /// Evaluated in log space, as the binomial coefficient alone overflows for long runs.
    pub fn probability_exactly(&self, name: &str, hits: u64, trials: u64) -> f64 {
        if hits > trials {
            return 0.0;
        }
        let probability = self.probability_of(name);
        if probability == 0.0 {
            return if hits == 0 { 1.0 } else { 0.0 };
        }
        if probability == 1.0 {
            return if hits == trials { 1.0 } else { 0.0 };
        }
        let ln_probability = ln_binomial(trials, hits)
            + hits as f64 * probability.ln()
            + (trials - hits) as f64 * (-probability).ln_1p();
        ln_probability.exp()
    }

    /// Probability that the named prize is drawn at least `hits` times in `trials` spins.
    /// Sums whichever tail of the binomial distribution is shorter.
    pub fn probability_at_least(&self, name: &str, hits: u64, trials: u64) -> f64 {
        if hits == 0 {
            return 1.0;
        }
        if hits > trials {
            return 0.0;
        }
        if hits == 1 {
            return self.probability_within_trials(name, trials);
        }
        let at_least: f64 = if hits > trials / 2 {
            (hits..=trials)
                .map(|count| self.probability_exactly(name, count, trials))
                .sum()
        } else {
            let fewer: f64 = (0..hits)
                .map(|count| self.probability_exactly(name, count, trials))
                .sum();
            1.0 - fewer
        };
        f64::clamp(at_least, 0.0, 1.0)
    }

    /// What `trials` spins cost at the engine's trial price.
    pub fn cost_of(&self, trials: u64) -> f64 {
        trials as f64 * self.distribution.trial_price()
    }

    /// [probability_within_trials](Self::probability_within_trials) and
    /// [cost_of](Self::cost_of) for each of the given run lengths.
    pub fn probability_curve(
        &self,
        name: &str,
        trials: impl IntoIterator<Item = u64>,
    ) -> Vec<CurvePoint> {
        trials
            .into_iter()
            .map(|trials| CurvePoint {
                trials,
                probability: self.probability_within_trials(name, trials),
                cost: self.cost_of(trials),
            })
            .collect()
    }

    pub fn profitability(&self, name: &str) -> Result<Profitability, UnreachablePrize> {
        let expected_trials = self.expected_trials_for(name)?;
        let value = self
            .distribution
            .get(name)
            .map(|prize| prize.prize.value)
            .ok_or_else(|| UnreachablePrize(name.into()))?;
        let expected_cost = expected_trials * self.distribution.trial_price();
        let profit = value - expected_cost;
        Ok(Profitability {
            expected_trials,
            expected_cost,
            value,
            profit,
            profit_ratio: profit / expected_cost,
        })
    }

    /// Estimated probability that `trials` spins contain every prize at least once. Zero
    /// without simulating when there are fewer spins than prizes.
    pub fn probability_all_collected_within(&mut self, trials: u64) -> f64 {
        self.probability_collected_within(&Collection::Everything, trials)
    }

    /// Estimated probability that `trials` spins contain every prize in the collection.
    pub fn probability_collected_within(&mut self, collection: &Collection, trials: u64) -> f64 {
        let mut engine = MonteCarloEngine::default()
            .with_trials(self.simulation.within_trials)
            .with_cumulative(Capture::Borrowed(self.distribution.cumulative()))
            .with_rand(CaptureMut::Borrowed(&mut self.rand));
        let timed = Timed::run(|| engine.simulate_within(collection, trials));
        debug!(
            "simulated {collection:?} within {trials} trials: {} in {:?}",
            timed.value, timed.elapsed
        );
        timed.value.quotient()
    }

    /// Estimated mean number of spins to draw every prize at least once. See
    /// [CollectionEstimate] for the downward bias introduced by capped runs.
    pub fn expected_trials_for_all_collected(&mut self) -> CollectionEstimate {
        self.expected_trials_for_collected(&Collection::Everything)
    }

    pub fn expected_trials_for_collected(&mut self, collection: &Collection) -> CollectionEstimate {
        let mut engine = MonteCarloEngine::default()
            .with_trials(self.simulation.collection_trials)
            .with_draw_cap(self.simulation.draw_cap)
            .with_cumulative(Capture::Borrowed(self.distribution.cumulative()))
            .with_rand(CaptureMut::Borrowed(&mut self.rand));
        let timed = Timed::run(|| engine.simulate_until(collection));
        debug!(
            "simulated {collection:?} until collected: {:?} in {:?}",
            timed.value, timed.elapsed
        );
        if timed.value.is_biased() {
            trace!(
                "{} of {} runs reached the cap of {} draws",
                timed.value.capped,
                timed.value.trials,
                self.simulation.draw_cap
            );
        }
        timed.value
    }
}
