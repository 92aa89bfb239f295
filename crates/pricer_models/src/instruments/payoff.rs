//! Payoff profiles at expiry.
//!
//! Maps a grid of hypothetical underlying prices at expiry to the profit or
//! loss of a single option holding, net of premium. Independent of the
//! pricer: no volatility, rates or time enter here.

use pricer_core::math::rounding::{round_to, PAYOFF_DECIMALS};

use super::option_type::{OptionType, Position};

/// One point of a payoff profile.
///
/// All fields are rounded to 2 decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PayoffPoint {
    /// Underlying price at expiry
    pub price: f64,
    /// Profit or loss of the holding net of premium
    pub payoff: f64,
    /// Exercise value of the option at this price
    pub intrinsic: f64,
}

/// Computes the expiry profit/loss profile over `prices`.
///
/// Output order and length match the input grid. An empty grid gives an
/// empty profile.
///
/// # Arguments
/// * `prices` - Underlying prices at expiry
/// * `strike` - Option strike K
/// * `premium` - Premium paid (Long) or received (Short)
/// * `option_type` - Call or put
/// * `position` - Long or short
///
/// # Examples
/// ```
/// use pricer_models::instruments::{payoff_profile, OptionType, Position};
///
/// let profile = payoff_profile(&[90.0, 100.0, 110.0], 100.0, 5.0, OptionType::Call, Position::Long);
///
/// assert_eq!(profile.len(), 3);
/// assert_eq!(profile[0].payoff, -5.0);
/// assert_eq!(profile[1].payoff, -5.0);
/// assert_eq!(profile[2].payoff, 5.0);
/// assert_eq!(profile[2].intrinsic, 10.0);
/// ```
pub fn payoff_profile(
    prices: &[f64],
    strike: f64,
    premium: f64,
    option_type: OptionType,
    position: Position,
) -> Vec<PayoffPoint> {
    prices
        .iter()
        .map(|&price| {
            let intrinsic = option_type.intrinsic(price, strike);
            let payoff = position.payoff(intrinsic, premium);
            PayoffPoint {
                price: round_to(price, PAYOFF_DECIMALS),
                payoff: round_to(payoff, PAYOFF_DECIMALS),
                intrinsic: round_to(intrinsic, PAYOFF_DECIMALS),
            }
        })
        .collect()
}

/// Break-even and extreme outcomes of a single option holding at expiry.
///
/// `max_profit` and `max_loss` are magnitudes; `None` means unbounded.
/// Values are rounded to 2 decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PayoffSummary {
    /// Underlying price at which the holding nets zero
    pub break_even: f64,
    /// Largest attainable gain
    pub max_profit: Option<f64>,
    /// Largest attainable loss
    pub max_loss: Option<f64>,
}

/// Summarises the expiry payoff of one holding.
///
/// A call's upside is unbounded, so a long call has no maximum profit and
/// a short call no maximum loss. A put is bounded by the underlying
/// falling to zero: `strike - premium`.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{payoff_summary, OptionType, Position};
///
/// let long_call = payoff_summary(100.0, 5.0, OptionType::Call, Position::Long);
/// assert_eq!(long_call.break_even, 105.0);
/// assert_eq!(long_call.max_profit, None);
/// assert_eq!(long_call.max_loss, Some(5.0));
///
/// let short_put = payoff_summary(100.0, 5.0, OptionType::Put, Position::Short);
/// assert_eq!(short_put.break_even, 95.0);
/// assert_eq!(short_put.max_profit, Some(5.0));
/// assert_eq!(short_put.max_loss, Some(95.0));
/// ```
pub fn payoff_summary(
    strike: f64,
    premium: f64,
    option_type: OptionType,
    position: Position,
) -> PayoffSummary {
    let cents = |v: f64| round_to(v, PAYOFF_DECIMALS);

    let (break_even, put_floor) = match option_type {
        OptionType::Call => (strike + premium, None),
        OptionType::Put => (strike - premium, Some(strike - premium)),
    };

    let (max_profit, max_loss) = match position {
        Position::Long => (put_floor, Some(premium)),
        Position::Short => (Some(premium), put_floor),
    };

    PayoffSummary {
        break_even: cents(break_even),
        max_profit: max_profit.map(cents),
        max_loss: max_loss.map(cents),
    }
}

/// Evenly spaced grid from `min` to `max` inclusive.
///
/// `steps == 0` gives an empty grid and `steps == 1` gives `[min]`. For
/// larger counts the first and last points are exactly `min` and `max`.
///
/// # Examples
/// ```
/// use pricer_models::instruments::price_grid;
///
/// assert_eq!(price_grid(80.0, 120.0, 5), vec![80.0, 90.0, 100.0, 110.0, 120.0]);
/// assert_eq!(price_grid(80.0, 120.0, 1), vec![80.0]);
/// assert!(price_grid(80.0, 120.0, 0).is_empty());
/// ```
pub fn price_grid(min: f64, max: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let last = steps - 1;
            let step = (max - min) / last as f64;
            (0..steps)
                .map(|i| if i == last { max } else { min + step * i as f64 })
                .collect()
        }
    }
}
