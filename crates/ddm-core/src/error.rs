//! Parameter validation error type.
//!
//! Sub-crates define their own error enums and wrap `ParamError` as one
//! variant via `#[from]`.  Every variant here is detected up front, before a
//! single random draw, so a failed run never leaves partial output behind.

use thiserror::Error;

/// Rejected model parameters or run settings.
#[derive(Debug, Error, PartialEq)]
pub enum ParamError {
    #[error("boundary separation must be positive and finite, got {0}")]
    NonPositiveBoundary(f64),

    #[error("diffusion coefficient must be positive and finite, got {0}")]
    NonPositiveDiffusion(f64),

    #[error("relative starting point must lie strictly inside (0, 1), got {0}")]
    StartOutOfRange(f64),

    #[error("non-decision time must be non-negative and finite, got {0}")]
    NegativeNonDecision(f64),

    #[error("integration timestep must be positive and finite, got {0}")]
    InvalidTimestep(f64),
}

/// Shorthand result type for parameter checks.
pub type ParamResult<T> = Result<T, ParamError>;
