//! Float assertions shared by the spinwheel test suites.

use assert_float_eq::*;

fn assert_same_len(expected: &[f64], actual: &[f64]) {
    assert_eq!(
        expected.len(),
        actual.len(),
        "lengths do not match: {} ≠ {}",
        expected.len(),
        actual.len()
    );
}

/// Asserts that two slices are element-wise within `distance` ULPs of each other.
pub fn assert_slice_f64_near(expected: &[f64], actual: &[f64], distance: u32) {
    assert_same_len(expected, actual);
    for (&expected, &actual) in expected.iter().zip(actual) {
        assert_f64_near!(expected, actual, distance);
    }
}

/// Asserts that two slices are element-wise within a relative `epsilon` of each other.
pub fn assert_slice_f64_relative(expected: &[f64], actual: &[f64], epsilon: f64) {
    assert_same_len(expected, actual);
    for (&expected, &actual) in expected.iter().zip(actual) {
        if expected != actual {
            assert_float_relative_eq!(expected, actual, epsilon);
        }
    }
}

/// Asserts that a simulated estimate lands within `tolerance` of the expected value.
pub fn assert_estimate(expected: f64, actual: f64, tolerance: f64) {
    assert!(
        (expected - actual).abs() <= tolerance,
        "estimate {actual} is not within {tolerance} of {expected}"
    );
}
