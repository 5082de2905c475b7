//! Error types.
//!
//! The registration protocol itself never fails: absence is reported as the
//! [`NOT_FOR_SALE`](crate::types::NOT_FOR_SALE) sentinel. Errors only arise
//! when validating a price supplied from outside.

use thiserror::Error;

/// Rejected price input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PriceError {
    /// Not a decimal number, or out of `f64` range
    #[error("invalid price: {0:?}")]
    Invalid(String),

    #[error("price must not be negative, got {0}")]
    Negative(f64),

    #[error("price must be finite, got {0}")]
    NotFinite(f64),
}
