//! Convenience queries for callers that build an engine per request, such as a web handler.
//! Each call ranks the supplied prizes afresh.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::ProbabilityEngine;
use crate::error::InvalidInput;
use crate::prize::Prize;

pub const DEFAULT_CONFIDENCE: f64 = 0.8;
pub const MAX_RECOMMENDED_TRIALS: u64 = 1_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointProbability {
    /// Probability of drawing the target prize at least once.
    pub target: f64,
    /// Estimated probability of drawing every prize at least once.
    pub all_collected: f64,
}

/// The chance of winning `target` within `trials` spins, alongside the chance of collecting
/// every prize within the same spins.
pub fn joint_query(
    prizes: &[Prize],
    target: &str,
    trial_price: f64,
    trials: u64,
) -> Result<JointProbability, InvalidInput> {
    let mut engine = ProbabilityEngine::new(prizes.to_vec(), trial_price)?;
    let joint = JointProbability {
        target: engine.probability_within_trials(target, trials),
        all_collected: engine.probability_all_collected_within(trials),
    };
    debug!("joint query for {target} over {trials} trials: {joint:?}");
    Ok(joint)
}

/// The fewest spins, up to [MAX_RECOMMENDED_TRIALS], for which the chance of winning `target`
/// reaches `confidence`. `None` if no run length in that range gets there.
pub fn minimum_trials_for_confidence(
    prizes: &[Prize],
    target: &str,
    trial_price: f64,
    confidence: f64,
) -> Result<Option<u64>, InvalidInput> {
    let engine = ProbabilityEngine::new(prizes.to_vec(), trial_price)?;
    let trials = (1..=MAX_RECOMMENDED_TRIALS)
        .find(|&trials| engine.probability_within_trials(target, trials) >= confidence);
    debug!("minimum trials for {target} at confidence {confidence}: {trials:?}");
    Ok(trials)
}
