//! Combinatorics.

/// Natural log of the binomial coefficient _n_ choose _k_, as a sum of log ratios over the
/// shorter side. Stays finite for any _n_, where the coefficient itself would overflow.
/// Negative infinity when _k_ > _n_.
pub fn ln_binomial(n: u64, k: u64) -> f64 {
    if k > n {
        return f64::NEG_INFINITY;
    }
    let k = u64::min(k, n - k);
    (0..k)
        .map(|i| ((n - i) as f64).ln() - ((i + 1) as f64).ln())
        .sum()
}
