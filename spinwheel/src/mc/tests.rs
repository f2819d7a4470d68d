use super::*;
use crate::testing::{gadgets, triplets, GADGET_TRIAL_PRICE};
use crate::weight::WeightRanker;
use spinwheel_testing::assert_estimate;
use std::cell::Cell;
use tinyrand::Seeded;
use tinyrand_alloc::Mock;

/// Generator output that maps to `fraction` under `random_f64`.
fn fixed(fraction: f64) -> u64 {
    ((fraction * (1u64 << 53) as f64) as u64) << 11
}

fn mock(fraction: f64) -> impl Rand {
    let output = fixed(fraction);
    Mock::default().with_next_u128(move |_| output as u128)
}

#[test]
fn random_f64_bounds() {
    assert_eq!(0.0, random_f64(&mut Mock::default().with_next_u128(|_| 0)));
    let top = random_f64(&mut Mock::default().with_next_u128(|_| u64::MAX as u128));
    assert!(top < 1.0);
    assert!(top > 0.999_999);
}

#[test]
fn draw_by_interval() {
    let cumulative = [0.5, 0.75, 1.0];
    assert_eq!(0, draw(&cumulative, &mut mock(0.0)));
    assert_eq!(0, draw(&cumulative, &mut mock(0.49)));
    assert_eq!(1, draw(&cumulative, &mut mock(0.5)));
    assert_eq!(1, draw(&cumulative, &mut mock(0.74)));
    assert_eq!(2, draw(&cumulative, &mut mock(0.75)));
    assert_eq!(2, draw(&cumulative, &mut mock(0.999)));
}

#[test]
fn draw_skips_zero_probability() {
    let cumulative = [0.5, 0.5, 1.0];
    assert_eq!(2, draw(&cumulative, &mut mock(0.5)));
}

#[test]
fn draw_falls_back_to_last_reachable() {
    let cumulative = [0.5, 0.9999, 0.9999];
    assert_eq!(1, draw(&cumulative, &mut mock(0.99995)));
}

#[test]
fn run_within_success_and_failure() {
    let cumulative = [0.5, 1.0];
    let mut bitmap = [false; 2];
    assert!(!run_within(
        &cumulative,
        10,
        &Collection::Everything,
        &mut bitmap,
        &mut mock(0.25)
    ));
    assert!(run_within(
        &cumulative,
        1,
        &Collection::prize(0),
        &mut bitmap,
        &mut mock(0.25)
    ));
    assert!(run_within(
        &cumulative,
        0,
        &Collection::Subset(vec![]),
        &mut bitmap,
        &mut mock(0.25)
    ));
}

#[test]
fn run_until_counts_draws() {
    let cumulative = [0.5, 1.0];
    let mut bitmap = [false; 2];
    let invocations = Cell::new(0);
    let mut alternating = Mock::default().with_next_u128(|_| {
        invocations.set(invocations.get() + 1);
        if invocations.get() % 2 == 1 {
            fixed(0.25) as u128
        } else {
            fixed(0.75) as u128
        }
    });
    assert_eq!(
        Some(2),
        run_until(
            &cumulative,
            100,
            &Collection::Everything,
            &mut bitmap,
            &mut alternating
        )
    );
    assert_eq!(
        None,
        run_until(
            &cumulative,
            100,
            &Collection::Everything,
            &mut bitmap,
            &mut mock(0.25)
        )
    );
}

#[test]
fn simulate_within_too_few_draws() {
    let distribution = WeightRanker::default()
        .rank(gadgets(), GADGET_TRIAL_PRICE)
        .unwrap();
    let mut engine = MonteCarloEngine::default()
        .with_trials(1_000)
        .with_cumulative(Capture::Borrowed(distribution.cumulative()));
    for draws in 0..4 {
        let frac = engine.simulate_within(&Collection::Everything, draws);
        assert_eq!(0, frac.numerator);
        assert_eq!(1_000, frac.denominator);
    }
}

#[test]
fn simulate_within_uniform_triplets() {
    let distribution = WeightRanker::default().rank(triplets(), 10.0).unwrap();
    let mut engine = MonteCarloEngine::default()
        .with_cumulative(Capture::Borrowed(distribution.cumulative()))
        .with_rand(CaptureMut::Owned(StdRand::seed(42)));
    // inclusion-exclusion: 1 - 3(2/3)^5 + 3(1/3)^5
    let frac = engine.simulate_within(&Collection::Everything, 5);
    assert_eq!(DEFAULT_WITHIN_TRIALS, frac.denominator);
    assert_estimate(150.0 / 243.0, frac.quotient(), 0.01);
}

#[test]
fn simulate_within_single_prize_matches_geometric() {
    let distribution = WeightRanker::default()
        .rank(gadgets(), GADGET_TRIAL_PRICE)
        .unwrap();
    let tablet = distribution.get("Tablet").unwrap().probability;
    let mut engine = MonteCarloEngine::default()
        .with_cumulative(Capture::Borrowed(distribution.cumulative()))
        .with_rand(CaptureMut::Owned(StdRand::seed(7)));
    let frac = engine.simulate_within(&Collection::prize(1), 10);
    assert_estimate(1.0 - (1.0 - tablet).powi(10), frac.quotient(), 0.01);
}

#[test]
fn simulate_within_unreachable() {
    let cumulative = vec![1.0, 1.0];
    let mut engine = MonteCarloEngine::default()
        .with_trials(100)
        .with_cumulative(Capture::Owned(cumulative));
    assert_eq!(0, engine.simulate_within(&Collection::Everything, 50).numerator);
    assert_eq!(100, engine.simulate_within(&Collection::prize(0), 50).numerator);
}

#[test]
fn simulate_within_narrows_with_more_trials() {
    fn sample_variance(trials: u64) -> f64 {
        let distribution = WeightRanker::default().rank(triplets(), 10.0).unwrap();
        let estimates: Vec<_> = (0..20)
            .map(|seed| {
                MonteCarloEngine::default()
                    .with_trials(trials)
                    .with_cumulative(Capture::Borrowed(distribution.cumulative()))
                    .with_rand(CaptureMut::Owned(StdRand::seed(seed)))
                    .simulate_within(&Collection::Everything, 5)
                    .quotient()
            })
            .collect();
        let mean = estimates.iter().sum::<f64>() / estimates.len() as f64;
        estimates
            .iter()
            .map(|estimate| (estimate - mean).powi(2))
            .sum::<f64>()
            / (estimates.len() - 1) as f64
    }

    assert!(sample_variance(10_000) < sample_variance(1_000));
}

#[test]
fn simulate_until_uniform_triplets() {
    let distribution = WeightRanker::default().rank(triplets(), 10.0).unwrap();
    let mut bitmap = [false; 3];
    let mut engine = MonteCarloEngine::default()
        .with_trials(DEFAULT_COLLECTION_TRIALS)
        .with_cumulative(Capture::Borrowed(distribution.cumulative()))
        .with_bitmap(CaptureMut::Borrowed(&mut bitmap))
        .with_rand(CaptureMut::Owned(StdRand::seed(42)));
    // 3 × (1 + 1/2 + 1/3)
    let estimate = engine.simulate_until(&Collection::Everything);
    assert_eq!(DEFAULT_COLLECTION_TRIALS, estimate.trials);
    assert_eq!(0, estimate.capped);
    assert!(!estimate.is_biased());
    assert_estimate(5.5, estimate.mean_draws, 0.15);
}

#[test]
fn simulate_until_reports_capped_runs() {
    let distribution = WeightRanker::default()
        .rank(gadgets(), GADGET_TRIAL_PRICE)
        .unwrap();
    let mut engine = MonteCarloEngine::default()
        .with_trials(DEFAULT_COLLECTION_TRIALS)
        .with_cumulative(Capture::Borrowed(distribution.cumulative()))
        .with_rand(CaptureMut::Owned(StdRand::seed(42)));
    let estimate = engine.simulate_until(&Collection::Everything);
    assert!(estimate.is_biased());
    assert!(estimate.mean_draws <= DEFAULT_DRAW_CAP as f64);
    assert!(estimate.mean_draws > 100.0);
}

#[test]
fn simulate_until_unreachable() {
    let mut engine = MonteCarloEngine::default()
        .with_trials(10)
        .with_draw_cap(50)
        .with_cumulative(Capture::Owned(vec![1.0, 1.0]));
    let estimate = engine.simulate_until(&Collection::Everything);
    assert_eq!(
        CollectionEstimate {
            trials: 10,
            mean_draws: 50.0,
            capped: 10
        },
        estimate
    );
}

#[test]
fn config_validate() {
    SimulationConfig::default().validate().unwrap();
    assert_eq!(
        "draw cap must be positive",
        SimulationConfig {
            draw_cap: 0,
            ..SimulationConfig::default()
        }
        .validate()
        .unwrap_err()
        .to_string()
    );
    assert!(SimulationConfig {
        within_trials: 0,
        ..SimulationConfig::default()
    }
    .validate()
    .is_err());
}
