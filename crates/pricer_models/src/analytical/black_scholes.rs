//! Black-Scholes-Merton pricing model for European options.
//!
//! This module provides the Black-Scholes model with a continuous dividend
//! yield, its analytical Greeks, and the [`price_option`] entry point that
//! turns an [`OptionSpec`] into a display-ready [`PricingResult`].
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·e^(-qT)·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·e^(-qT)·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T

use num_traits::Float;
use pricer_core::math::rounding::GREEK_DECIMALS;
use pricer_core::types::PricingError;

use super::distributions::{norm_cdf, norm_pdf};
use super::result::{Greeks, PricingRegime, PricingResult};
use crate::instruments::{OptionSpec, OptionType};

/// Calendar days per year used to report theta per day.
const DAYS_PER_YEAR: f64 = 365.0;

/// Scale from per-unit to per-percentage-point sensitivities.
const PERCENT: f64 = 100.0;

/// Black-Scholes-Merton model for European option pricing.
///
/// Provides closed-form pricing and Greeks for European options under
/// lognormal dynamics with a continuous dividend yield. All sensitivities
/// returned here are raw model derivatives: annualised and unscaled.
///
/// Methods taking an `expiry` treat `expiry <= 0` as expired: the price is
/// the intrinsic value and every sensitivity is zero.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`, `f32`)
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
/// use pricer_models::instruments::OptionType;
///
/// let bs = BlackScholes::new(100.0_f64, 0.05, 0.0, 0.2).unwrap();
/// let call_price = bs.price(100.0, 1.0, OptionType::Call);
/// let put_price = bs.price(100.0, 1.0, OptionType::Put);
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call_price - put_price - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BlackScholes<T: Float> {
    /// Spot price (S)
    spot: T,
    /// Risk-free interest rate (r)
    rate: T,
    /// Continuous dividend yield (q)
    dividend: T,
    /// Volatility (σ)
    volatility: T,
}

impl<T: Float> BlackScholes<T> {
    /// Creates a new Black-Scholes-Merton model.
    ///
    /// # Arguments
    /// * `spot` - Current spot price (must be positive)
    /// * `rate` - Risk-free interest rate (annualised)
    /// * `dividend` - Continuous dividend yield (annualised)
    /// * `volatility` - Volatility (must be positive)
    ///
    /// # Errors
    /// - `PricingError::InvalidInput` if spot <= 0, volatility <= 0, or any
    ///   parameter is not finite
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// assert!(BlackScholes::new(100.0_f64, 0.05, 0.02, 0.2).is_ok());
    /// assert!(BlackScholes::new(-100.0_f64, 0.05, 0.0, 0.2).is_err());
    /// assert!(BlackScholes::new(100.0_f64, 0.05, 0.0, 0.0).is_err());
    /// ```
    pub fn new(spot: T, rate: T, dividend: T, volatility: T) -> Result<Self, PricingError> {
        let zero = T::zero();

        let all_finite = [spot, rate, dividend, volatility]
            .iter()
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(PricingError::InvalidInput(
                "Black-Scholes parameters must be finite".to_string(),
            ));
        }

        if spot <= zero {
            return Err(PricingError::InvalidInput(format!(
                "Spot must be positive: S = {}",
                spot.to_f64().unwrap_or(f64::NAN)
            )));
        }

        if volatility <= zero {
            return Err(PricingError::InvalidInput(format!(
                "Volatility must be positive: sigma = {}",
                volatility.to_f64().unwrap_or(f64::NAN)
            )));
        }

        Ok(Self {
            spot,
            rate,
            dividend,
            volatility,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the dividend yield.
    #[inline]
    pub fn dividend(&self) -> T {
        self.dividend
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    #[inline]
    fn expired(expiry: T) -> bool {
        expiry <= T::zero()
    }

    /// Computes the d1 term of the Black-Scholes-Merton formula.
    ///
    /// d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
    ///
    /// # Arguments
    /// * `strike` - Strike price (K)
    /// * `expiry` - Time to expiration in years (T, must be positive)
    #[inline]
    pub fn d1(&self, strike: T, expiry: T) -> T {
        let half = T::from(0.5).unwrap();
        let vol_sqrt_t = self.volatility * expiry.sqrt();

        let log_moneyness = (self.spot / strike).ln();
        let drift =
            (self.rate - self.dividend + half * self.volatility * self.volatility) * expiry;

        (log_moneyness + drift) / vol_sqrt_t
    }

    /// Computes the d2 term of the Black-Scholes-Merton formula.
    ///
    /// d₂ = d₁ - σ√T
    #[inline]
    pub fn d2(&self, strike: T, expiry: T) -> T {
        self.d1(strike, expiry) - self.volatility * expiry.sqrt()
    }

    /// Spot discounted at the dividend yield: S·e^(-qT).
    #[inline]
    fn forward_spot(&self, expiry: T) -> T {
        self.spot * (-self.dividend * expiry).exp()
    }

    /// Strike discounted at the risk-free rate: K·e^(-rT).
    #[inline]
    fn discounted_strike(&self, strike: T, expiry: T) -> T {
        strike * (-self.rate * expiry).exp()
    }

    /// Computes the European option price.
    ///
    /// - Call: S·e^(-qT)·N(d₁) - K·e^(-rT)·N(d₂)
    /// - Put: K·e^(-rT)·N(-d₂) - S·e^(-qT)·N(-d₁)
    ///
    /// # Arguments
    /// * `strike` - Strike price (K)
    /// * `expiry` - Time to expiration in years (T)
    /// * `option_type` - Call or put
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    /// use pricer_models::instruments::OptionType;
    ///
    /// let bs = BlackScholes::new(100.0_f64, 0.05, 0.0, 0.2).unwrap();
    /// let price = bs.price(100.0, 1.0, OptionType::Call);
    /// assert!((price - 10.450583572185565).abs() < 1e-10);
    /// ```
    #[inline]
    pub fn price(&self, strike: T, expiry: T, option_type: OptionType) -> T {
        if Self::expired(expiry) {
            return option_type.intrinsic(self.spot, strike);
        }

        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        let fwd = self.forward_spot(expiry);
        let disc_k = self.discounted_strike(strike, expiry);

        match option_type {
            OptionType::Call => fwd * norm_cdf(d1) - disc_k * norm_cdf(d2),
            OptionType::Put => disc_k * norm_cdf(-d2) - fwd * norm_cdf(-d1),
        }
    }

    /// Computes Delta (∂V/∂S).
    ///
    /// - Call Delta = e^(-qT)·N(d₁)
    /// - Put Delta = -e^(-qT)·N(-d₁)
    #[inline]
    pub fn delta(&self, strike: T, expiry: T, option_type: OptionType) -> T {
        if Self::expired(expiry) {
            return T::zero();
        }

        let d1 = self.d1(strike, expiry);
        let carry = (-self.dividend * expiry).exp();

        match option_type {
            OptionType::Call => carry * norm_cdf(d1),
            OptionType::Put => -carry * norm_cdf(-d1),
        }
    }

    /// Computes Gamma (∂²V/∂S²).
    ///
    /// Gamma = e^(-qT)·φ(d₁) / (S·σ·√T), the same for calls and puts.
    #[inline]
    pub fn gamma(&self, strike: T, expiry: T) -> T {
        if Self::expired(expiry) {
            return T::zero();
        }

        let d1 = self.d1(strike, expiry);
        let carry = (-self.dividend * expiry).exp();

        carry * norm_pdf(d1) / (self.spot * self.volatility * expiry.sqrt())
    }

    /// Computes Vega (∂V/∂σ) per unit of volatility.
    ///
    /// Vega = S·e^(-qT)·φ(d₁)·√T, the same for calls and puts.
    #[inline]
    pub fn vega(&self, strike: T, expiry: T) -> T {
        if Self::expired(expiry) {
            return T::zero();
        }

        let d1 = self.d1(strike, expiry);
        self.forward_spot(expiry) * norm_pdf(d1) * expiry.sqrt()
    }

    /// Computes Theta (∂V/∂t) per year.
    ///
    /// With base = -S·e^(-qT)·φ(d₁)·σ / (2√T):
    /// - Call Theta = base - r·K·e^(-rT)·N(d₂) + q·S·e^(-qT)·N(d₁)
    /// - Put Theta = base + r·K·e^(-rT)·N(-d₂) - q·S·e^(-qT)·N(-d₁)
    ///
    /// Usually negative (time decay).
    #[inline]
    pub fn theta(&self, strike: T, expiry: T, option_type: OptionType) -> T {
        if Self::expired(expiry) {
            return T::zero();
        }

        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        let fwd = self.forward_spot(expiry);
        let disc_k = self.discounted_strike(strike, expiry);
        let two = T::from(2.0).unwrap();

        let base = -fwd * norm_pdf(d1) * self.volatility / (two * expiry.sqrt());

        match option_type {
            OptionType::Call => {
                base - self.rate * disc_k * norm_cdf(d2) + self.dividend * fwd * norm_cdf(d1)
            }
            OptionType::Put => {
                base + self.rate * disc_k * norm_cdf(-d2) - self.dividend * fwd * norm_cdf(-d1)
            }
        }
    }

    /// Computes Rho (∂V/∂r) per unit of rate.
    ///
    /// - Call Rho = K·T·e^(-rT)·N(d₂)
    /// - Put Rho = -K·T·e^(-rT)·N(-d₂)
    #[inline]
    pub fn rho(&self, strike: T, expiry: T, option_type: OptionType) -> T {
        if Self::expired(expiry) {
            return T::zero();
        }

        let d2 = self.d2(strike, expiry);
        let disc_k = self.discounted_strike(strike, expiry);

        match option_type {
            OptionType::Call => disc_k * expiry * norm_cdf(d2),
            OptionType::Put => -disc_k * expiry * norm_cdf(-d2),
        }
    }
}

/// Builds the model for a non-degenerate specification.
///
/// Returns `None` when T <= 0 or σ <= 0, or when the parameters are
/// otherwise rejected by the model.
fn model_for(spec: &OptionSpec) -> Option<BlackScholes<f64>> {
    if spec.maturity() <= 0.0 || spec.volatility() <= 0.0 {
        return None;
    }
    BlackScholes::new(
        spec.spot(),
        spec.rate(),
        spec.dividend_yield(),
        spec.volatility(),
    )
    .ok()
}

/// Raw sensitivities of `spec`: annualised, unscaled and unrounded.
///
/// Degenerate inputs (T <= 0 or σ <= 0) give all-zero Greeks.
///
/// # Examples
/// ```
/// use pricer_models::analytical::raw_greeks;
/// use pricer_models::instruments::{OptionSpec, OptionType};
///
/// let spec = OptionSpec::new(100.0, 100.0, 1.0, 0.2, 0.05, OptionType::Call).unwrap();
/// let greeks = raw_greeks(&spec);
/// assert!((greeks.vega - 37.52403469169379).abs() < 1e-9);
/// ```
pub fn raw_greeks(spec: &OptionSpec) -> Greeks {
    let Some(model) = model_for(spec) else {
        return Greeks::default();
    };

    let k = spec.strike();
    let t = spec.maturity();
    let ty = spec.option_type();

    Greeks {
        delta: model.delta(k, t, ty),
        gamma: model.gamma(k, t),
        theta: model.theta(k, t, ty),
        vega: model.vega(k, t),
        rho: model.rho(k, t, ty),
    }
}

/// Prices a European option and reports display-unit Greeks.
///
/// - Degenerate branch (T <= 0 or σ <= 0): price equals intrinsic value,
///   time value and all Greeks are zero
/// - General branch: closed-form price floored at zero; theta per calendar
///   day, vega and rho per percentage point, Greeks rounded to 4 decimals
///
/// Price, intrinsic value and time value are not rounded.
///
/// The price is floored at zero only. A deep in-the-money European put
/// with a positive rate (or a call with a large dividend yield) is worth
/// less than its intrinsic value; the price is reported as is and the
/// time value clamps to zero.
///
/// # Examples
/// ```
/// use pricer_models::analytical::{price_option, PricingRegime};
/// use pricer_models::instruments::{OptionSpec, OptionType};
///
/// let spec = OptionSpec::new(100.0, 100.0, 1.0, 0.2, 0.05, OptionType::Call).unwrap();
/// let result = price_option(&spec);
///
/// assert!((result.price - 10.4506).abs() < 1e-4);
/// assert_eq!(result.greeks.delta, 0.6368);
/// assert_eq!(result.regime, PricingRegime::Normal);
/// ```
pub fn price_option(spec: &OptionSpec) -> PricingResult {
    let intrinsic_value = spec.intrinsic_value();

    let Some(model) = model_for(spec) else {
        return PricingResult {
            price: intrinsic_value,
            intrinsic_value,
            time_value: 0.0,
            greeks: Greeks::default(),
            regime: PricingRegime::Degenerate,
        };
    };

    let price = model
        .price(spec.strike(), spec.maturity(), spec.option_type())
        .max(0.0);
    let raw = raw_greeks(spec);

    let greeks = Greeks {
        theta: raw.theta / DAYS_PER_YEAR,
        vega: raw.vega / PERCENT,
        rho: raw.rho / PERCENT,
        ..raw
    }
    .rounded(GREEK_DECIMALS);

    PricingResult {
        price,
        intrinsic_value,
        time_value: (price - intrinsic_value).max(0.0),
        greeks,
        regime: PricingRegime::Normal,
    }
}
