//! Utilities for working with probabilities.

use std::fmt::{Display, Formatter};

pub trait SliceExt {
    fn sum(&self) -> f64;
    fn normalise(&mut self, target: f64) -> f64;
    fn scale(&mut self, factor: f64);
    fn running_sum(&self) -> Vec<f64>;
}
impl SliceExt for [f64] {
    fn sum(&self) -> f64 {
        self.iter().sum()
    }

    /// Scales the slice so that it sums to `target`, returning the sum prior to scaling.
    /// A slice summing to zero is left untouched.
    fn normalise(&mut self, target: f64) -> f64 {
        let sum = self.sum();
        if sum > 0.0 {
            self.scale(target / sum);
        }
        sum
    }

    fn scale(&mut self, factor: f64) {
        for element in self {
            *element *= factor;
        }
    }

    fn running_sum(&self) -> Vec<f64> {
        let mut cumulative = 0.0;
        self.iter()
            .map(|&element| {
                cumulative += element;
                cumulative
            })
            .collect()
    }
}

/// A tally of favourable outcomes over a number of simulated trials.
#[derive(Debug, Clone, PartialEq)]
pub struct Fraction {
    pub numerator: u64,
    pub denominator: u64,
}
impl Fraction {
    /// The ratio of the two counts, or zero if nothing was tallied.
    pub fn quotient(&self) -> f64 {
        if self.denominator == 0 {
            0.0
        } else {
            self.numerator as f64 / self.denominator as f64
        }
    }
}

impl Display for Fraction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}
