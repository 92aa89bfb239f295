//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors from pricing operations

use std::fmt;

/// Categorised pricing errors.
///
/// The numeric core absorbs degenerate inputs (expiry, zero volatility) and
/// non-convergence itself, so the only failures that surface are malformed
/// inputs rejected before evaluation and non-finite results detected after it.
///
/// # Variants
/// - `InvalidInput`: Invalid market data or parameters
/// - `NumericalInstability`: Computation produced a non-finite value
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidInput("Negative spot price".to_string());
/// assert_eq!(format!("{}", err), "Invalid input: Negative spot price");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PricingError {
    /// Invalid input data or parameters
    InvalidInput(String),

    /// Numerical instability during computation
    NumericalInstability(String),
}

impl fmt::Display for PricingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            PricingError::NumericalInstability(msg) => {
                write!(f, "Numerical instability: {}", msg)
            }
        }
    }
}

impl std::error::Error for PricingError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_display() {
        let err = PricingError::InvalidInput("strike must be positive".to_string());
        assert_eq!(format!("{}", err), "Invalid input: strike must be positive");
    }

    #[test]
    fn test_numerical_instability_display() {
        let err = PricingError::NumericalInstability("price is NaN".to_string());
        assert_eq!(format!("{}", err), "Numerical instability: price is NaN");
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = PricingError::InvalidInput("x".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
