//! Fixtures shared across unit tests.

use crate::prize::Prize;

pub const GADGET_TRIAL_PRICE: f64 = 100.0;

/// Four gadgets whose trials-needed ratios at [GADGET_TRIAL_PRICE] are 0.1, 0.5, 2 and 10.
pub fn gadgets() -> Vec<Prize> {
    vec![
        Prize::new("Phone", 10.0),
        Prize::new("Tablet", 50.0),
        Prize::new("Laptop", 200.0),
        Prize::new("Headphones", 1_000.0),
    ]
}

/// Three prizes with equal value, hence equal odds.
pub fn triplets() -> Vec<Prize> {
    vec![
        Prize::new("Red", 100.0),
        Prize::new("Green", 100.0),
        Prize::new("Blue", 100.0),
    ]
}
