//! Pricing result types.
//!
//! Provides [`Greeks`], [`PricingRegime`] and [`PricingResult`], the value
//! objects returned by [`price_option`](super::price_option).

use pricer_core::math::rounding::round_to;

/// Option sensitivities.
///
/// The unit convention depends on the producer:
/// - [`raw_greeks`](super::raw_greeks) returns model derivatives, annualised
///   and unscaled
/// - [`price_option`](super::price_option) returns display units: theta per
///   calendar day, vega and rho per 1 percentage point, all rounded to
///   4 decimals
///
/// # Examples
///
/// ```
/// use pricer_models::analytical::Greeks;
///
/// let greeks = Greeks::default();
/// assert_eq!(greeks.delta, 0.0);
/// assert_eq!(greeks.vega, 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Greeks {
    /// Delta: ∂V/∂S
    pub delta: f64,
    /// Gamma: ∂²V/∂S²
    pub gamma: f64,
    /// Theta: ∂V/∂t (calendar time, usually negative)
    pub theta: f64,
    /// Vega: ∂V/∂σ
    pub vega: f64,
    /// Rho: ∂V/∂r
    pub rho: f64,
}

impl Greeks {
    /// Rounds every sensitivity to `decimals` places, half away from zero.
    pub fn rounded(&self, decimals: i32) -> Self {
        Self {
            delta: round_to(self.delta, decimals),
            gamma: round_to(self.gamma, decimals),
            theta: round_to(self.theta, decimals),
            vega: round_to(self.vega, decimals),
            rho: round_to(self.rho, decimals),
        }
    }
}

/// Which branch of the pricer produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PricingRegime {
    /// Closed-form Black-Scholes-Merton evaluation.
    #[default]
    Normal,
    /// Expired (T <= 0) or zero-volatility (σ <= 0) input: the price is the
    /// intrinsic value and all Greeks are zero.
    Degenerate,
}

/// Full output of one option evaluation.
///
/// Invariants:
/// - `price >= 0` and `intrinsic_value >= 0`
/// - `time_value == max(0, price - intrinsic_value)`
/// - `regime == Degenerate` implies `price == intrinsic_value` and zero Greeks
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingResult {
    /// Theoretical option value.
    pub price: f64,
    /// Exercise value at the current spot.
    pub intrinsic_value: f64,
    /// Price in excess of intrinsic value, floored at zero.
    pub time_value: f64,
    /// Display-unit sensitivities.
    pub greeks: Greeks,
    /// Branch that produced this result.
    pub regime: PricingRegime,
}

impl PricingResult {
    /// Returns whether this result came from the degenerate branch.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.regime == PricingRegime::Degenerate
    }
}
