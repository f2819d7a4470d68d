//! Errors raised by the engine.

use thiserror::Error;

/// Rejected construction input. Fatal to the engine being built; callers must rebuild with
/// corrected input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInput {
    #[error("at least one prize must be supplied")]
    NoPrizes,

    #[error("prize {name} has non-positive value {value}")]
    NonPositiveValue { name: String, value: f64 },

    #[error("trial price must be positive and finite, got {0}")]
    NonPositivePrice(f64),

    #[error("duplicate prize {0}")]
    DuplicatePrize(String),

    #[error("weighting exponent must be positive and finite, got {0}")]
    InvalidExponent(f64),
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("prize {0} cannot be drawn")]
pub struct UnreachablePrize(pub String);

#[derive(Debug, Clone, PartialEq, Error)]
#[error("unknown prize {0}")]
pub struct UnknownPrize(pub String);
