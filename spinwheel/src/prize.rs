//! Prizes on offer and their ranked draw weights.

use serde::{Deserialize, Serialize};

/// A prize as supplied by the operator: a unique name and its worth, in the same currency as
/// the trial price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prize {
    pub name: String,
    pub value: f64,
}
impl Prize {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl From<(&str, f64)> for Prize {
    fn from((name, value): (&str, f64)) -> Self {
        Self::new(name, value)
    }
}

/// A prize together with its unnormalised weight and its single-trial draw probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedPrize {
    pub prize: Prize,
    pub weight: f64,
    pub probability: f64,
}
