//! Instrument error types.
//!
//! This module provides structured error handling for option specification
//! construction and for parsing the closed option-type and position enums.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Instrument-related errors.
///
/// These are the validation failures of the option analytics taxonomy: they
/// are raised while building an [`OptionSpec`](super::OptionSpec) or parsing
/// categorical inputs, never from inside the pricer.
///
/// # Variants
/// - `InvalidSpot`: Spot price is non-positive
/// - `InvalidStrike`: Strike price is non-positive
/// - `NonFiniteInput`: A numeric input is NaN or infinite
/// - `UnknownOptionType`: Option type outside {CALL, PUT}
/// - `UnknownPosition`: Position outside {LONG, SHORT}
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentError;
///
/// let err = InstrumentError::InvalidStrike { strike: -100.0 };
/// assert!(format!("{}", err).contains("-100"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Invalid spot price (non-positive).
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot value
        spot: f64,
    },

    /// Invalid strike price (non-positive).
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// A numeric input is NaN or infinite.
    #[error("Non-finite input: {name} = {value}")]
    NonFiniteInput {
        /// Name of the offending field
        name: &'static str,
        /// The offending value
        value: f64,
    },

    /// Option type outside {CALL, PUT}.
    #[error("Unknown option type: {0:?} (expected CALL or PUT)")]
    UnknownOptionType(String),

    /// Position outside {LONG, SHORT}.
    #[error("Unknown position: {0:?} (expected LONG or SHORT)")]
    UnknownPosition(String),
}

impl From<InstrumentError> for PricingError {
    fn from(err: InstrumentError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}
