//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Only invalid input and broken invariants end up here. Ordinary business
/// negatives (an unknown item, not enough stock) are reported as values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A stock or sale quantity was negative.
    #[error("invalid quantity: {0} (must be >= 0)")]
    InvalidQuantity(i64),

    /// A price could not be parsed.
    #[error("invalid price: {0}")]
    InvalidPrice(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_price(msg: impl Into<String>) -> Self {
        Self::InvalidPrice(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Reject negative quantities, passing non-negative ones through.
    pub fn ensure_non_negative(quantity: i64) -> DomainResult<i64> {
        if quantity < 0 {
            Err(Self::InvalidQuantity(quantity))
        } else {
            Ok(quantity)
        }
    }
}
