//! Ranking of prizes into a normalised draw [Distribution].
//!
//! Each prize is weighted by the inverse power of its _trials-needed_ ratio (value over trial
//! price). With the default exponent of 1.5 the probability of a prize falls away faster than
//! its value rises, so that dear prizes are suppressed more aggressively than under a plain
//! inverse-value scheme. An exponent of 1.0 yields the plain scheme.

use crate::error::InvalidInput;
use crate::prize::{Prize, WeightedPrize};
use crate::probs::SliceExt;
use anyhow::bail;
use rustc_hash::FxHashMap;
use tracing::debug;

pub const DEFAULT_EXPONENT: f64 = 1.5;

#[derive(Debug, Clone, PartialEq)]
pub struct WeightRanker {
    pub exponent: f64,
}
impl Default for WeightRanker {
    fn default() -> Self {
        Self {
            exponent: DEFAULT_EXPONENT,
        }
    }
}

impl WeightRanker {
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !self.exponent.is_finite() || self.exponent <= 0.0 {
            bail!("weighting exponent must be positive and finite");
        }
        Ok(())
    }

    /// The unnormalised weight of a prize worth `value` when a trial costs `trial_price`.
    #[inline]
    pub fn weigh(&self, value: f64, trial_price: f64) -> f64 {
        let trials_needed = value / trial_price;
        1.0 / trials_needed.powf(self.exponent)
    }

    /// Ranks the given prizes, in the order supplied.
    pub fn rank(
        &self,
        prizes: impl IntoIterator<Item = Prize>,
        trial_price: f64,
    ) -> Result<Distribution, InvalidInput> {
        if self.validate().is_err() {
            return Err(InvalidInput::InvalidExponent(self.exponent));
        }
        let prizes: Vec<_> = prizes.into_iter().collect();
        if prizes.is_empty() {
            return Err(InvalidInput::NoPrizes);
        }
        if !trial_price.is_finite() || trial_price <= 0.0 {
            return Err(InvalidInput::NonPositivePrice(trial_price));
        }

        let mut lookup = FxHashMap::default();
        for (index, prize) in prizes.iter().enumerate() {
            if prize.value.is_nan() || prize.value <= 0.0 {
                return Err(InvalidInput::NonPositiveValue {
                    name: prize.name.clone(),
                    value: prize.value,
                });
            }
            if lookup.insert(prize.name.clone(), index).is_some() {
                return Err(InvalidInput::DuplicatePrize(prize.name.clone()));
            }
        }

        let weights: Vec<_> = prizes
            .iter()
            .map(|prize| self.weigh(prize.value, trial_price))
            .collect();
        let total_weight = weights.sum();
        let probabilities = self.relative_weights(&prizes);

        debug!(
            "ranked {} prizes at trial price {trial_price}, total weight {total_weight:.6}",
            prizes.len()
        );

        let cumulative = probabilities.running_sum();
        let prizes = prizes
            .into_iter()
            .zip(weights)
            .zip(&probabilities)
            .map(|((prize, weight), &probability)| WeightedPrize {
                prize,
                weight,
                probability,
            })
            .collect();

        Ok(Distribution {
            prizes,
            probabilities,
            cumulative,
            lookup,
            trial_price,
            total_weight,
        })
    }

    /// Normalised weights. The trial price cancels out of `weight / total_weight`, so each
    /// weight is taken relative to the cheapest prize: `(min_value / value)^exponent`. This
    /// keeps the ratios finite where the raw weights would overflow or underflow.
    fn relative_weights(&self, prizes: &[Prize]) -> Vec<f64> {
        let min_value = prizes
            .iter()
            .map(|prize| prize.value)
            .fold(f64::INFINITY, f64::min);
        if min_value.is_infinite() {
            return vec![0.0; prizes.len()];
        }
        let mut probabilities: Vec<_> = prizes
            .iter()
            .map(|prize| (min_value / prize.value).powf(self.exponent))
            .collect();
        probabilities.normalise(1.0);
        probabilities
    }
}

/// Single-trial draw probabilities over a fixed prize set. Immutable once ranked.
#[derive(Debug, Clone)]
pub struct Distribution {
    prizes: Vec<WeightedPrize>,
    probabilities: Vec<f64>,
    cumulative: Vec<f64>,
    lookup: FxHashMap<String, usize>,
    trial_price: f64,
    total_weight: f64,
}
impl Distribution {
    pub fn prizes(&self) -> &[WeightedPrize] {
        &self.prizes
    }

    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Running sums of the probabilities, in stored order.
    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.lookup.get(name).copied()
    }

    pub fn get(&self, name: &str) -> Option<&WeightedPrize> {
        self.index_of(name).map(|index| &self.prizes[index])
    }

    pub fn trial_price(&self) -> f64 {
        self.trial_price
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    pub fn len(&self) -> usize {
        self.prizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prizes.is_empty()
    }
}
