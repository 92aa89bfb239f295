//! Fixed-decimal rounding.
//!
//! Reported prices and sensitivities carry a display-precision contract
//! (two decimals for payoff grids, four for Greeks). Internal computation
//! always runs at full precision; rounding is applied only when a result is
//! assembled for the caller.

use num_traits::Float;

/// Number of decimals used for reported Greeks.
pub const GREEK_DECIMALS: i32 = 4;

/// Number of decimals used for reported payoff grid values.
pub const PAYOFF_DECIMALS: i32 = 2;

/// Rounds `value` to `decimals` decimal places, half away from zero.
///
/// Non-finite values are returned unchanged.
///
/// # Examples
/// ```
/// use pricer_core::math::rounding::round_to;
///
/// assert_eq!(round_to(0.63683_f64, 4), 0.6368);
/// assert_eq!(round_to(-1.005_f64, 1), -1.0);
/// assert!(round_to(f64::NAN, 2).is_nan());
/// ```
#[inline]
pub fn round_to<T: Float>(value: T, decimals: i32) -> T {
    if !value.is_finite() {
        return value;
    }
    let factor = T::from(10.0).unwrap().powi(decimals);
    let scaled = value * factor;
    // Large magnitudes have no fractional digits left to round.
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}
