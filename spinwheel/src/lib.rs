//! Odds for a weighted spin-for-a-prize lottery. Ranks prizes into draw probabilities that
//! fall off super-linearly with value, answers single-prize questions in closed form, and
//! estimates coupon-collector questions (winning every prize) by Monte Carlo simulation.

pub mod capture;
pub mod collection;
pub mod comb;
pub mod engine;
pub mod error;
pub mod mc;
pub mod prize;
pub mod probs;
pub mod query;
pub mod seed;
pub mod timed;
pub mod weight;

#[cfg(test)]
pub(crate) mod testing;

#[doc = include_str!("../../README.md")]
#[cfg(doc)]
fn readme() {}
