//! European option specification.
//!
//! [`OptionSpec`] bundles the market and contract inputs of a single
//! Black-Scholes-Merton evaluation. It is an immutable value built fresh for
//! each call.

use super::error::InstrumentError;
use super::option_type::OptionType;

/// Inputs for pricing one European option.
///
/// Construction validates what the formula cannot absorb: spot and strike
/// must be strictly positive and every field finite. Zero or negative
/// maturity and volatility are accepted; the pricer treats them as the
/// degenerate intrinsic-value case.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{OptionSpec, OptionType};
///
/// let spec = OptionSpec::new(100.0, 95.0, 0.5, 0.25, 0.04, OptionType::Put)
///     .unwrap()
///     .with_dividend_yield(0.01)
///     .unwrap();
///
/// assert_eq!(spec.strike(), 95.0);
/// assert_eq!(spec.dividend_yield(), 0.01);
///
/// assert!(OptionSpec::new(0.0, 95.0, 0.5, 0.25, 0.04, OptionType::Put).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionSpec {
    spot: f64,
    strike: f64,
    maturity: f64,
    volatility: f64,
    rate: f64,
    dividend_yield: f64,
    option_type: OptionType,
}

impl OptionSpec {
    /// Creates a specification with zero dividend yield.
    ///
    /// # Arguments
    /// * `spot` - Underlying price S (> 0)
    /// * `strike` - Strike K (> 0)
    /// * `maturity` - Time to expiry T in years
    /// * `volatility` - Annualised volatility σ as a fraction
    /// * `rate` - Continuously compounded risk-free rate r as a fraction
    /// * `option_type` - Call or put
    ///
    /// # Errors
    /// - `InstrumentError::NonFiniteInput` if any value is NaN or infinite
    /// - `InstrumentError::InvalidSpot` if spot <= 0
    /// - `InstrumentError::InvalidStrike` if strike <= 0
    pub fn new(
        spot: f64,
        strike: f64,
        maturity: f64,
        volatility: f64,
        rate: f64,
        option_type: OptionType,
    ) -> Result<Self, InstrumentError> {
        ensure_finite("spot", spot)?;
        ensure_finite("strike", strike)?;
        ensure_finite("maturity", maturity)?;
        ensure_finite("volatility", volatility)?;
        ensure_finite("rate", rate)?;

        if spot <= 0.0 {
            return Err(InstrumentError::InvalidSpot { spot });
        }
        if strike <= 0.0 {
            return Err(InstrumentError::InvalidStrike { strike });
        }

        Ok(Self {
            spot,
            strike,
            maturity,
            volatility,
            rate,
            dividend_yield: 0.0,
            option_type,
        })
    }

    /// Returns a copy with continuous dividend yield `q`.
    ///
    /// # Errors
    /// - `InstrumentError::NonFiniteInput` if `q` is NaN or infinite
    pub fn with_dividend_yield(self, dividend_yield: f64) -> Result<Self, InstrumentError> {
        ensure_finite("dividend_yield", dividend_yield)?;
        Ok(Self {
            dividend_yield,
            ..self
        })
    }

    /// Returns a copy with volatility replaced.
    ///
    /// Used by the implied volatility solver to re-price at each iterate.
    /// The value is not re-validated; non-finite volatilities produce
    /// non-finite prices rather than errors.
    #[inline]
    pub fn with_volatility(self, volatility: f64) -> Self {
        Self { volatility, ..self }
    }

    /// Spot price S.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Strike K.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Time to expiry T in years.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Annualised volatility σ.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Risk-free rate r.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Continuous dividend yield q.
    #[inline]
    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }

    /// Call or put.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Exercise value at the current spot.
    #[inline]
    pub fn intrinsic_value(&self) -> f64 {
        self.option_type.intrinsic(self.spot, self.strike)
    }
}

fn ensure_finite(name: &'static str, value: f64) -> Result<(), InstrumentError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(InstrumentError::NonFiniteInput { name, value })
    }
}
