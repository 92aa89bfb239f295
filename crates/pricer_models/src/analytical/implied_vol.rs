//! Implied volatility inversion.
//!
//! Finds the volatility at which [`price_option`] reproduces an observed
//! market price, using bounded Newton-Raphson from `pricer_core`. The
//! derivative fed to Newton is the reported vega scaled back to per-unit
//! volatility, so the solver sees exactly the numbers a caller of
//! [`price_option`] would see.

use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig, Termination};
use pricer_core::types::PricingError;

use super::black_scholes::price_option;
use crate::instruments::OptionSpec;

/// Reported vega is per percentage point; Newton needs per unit.
const VEGA_UNIT_SCALE: f64 = 100.0;

/// Implied volatility solver settings.
///
/// # Examples
/// ```
/// use pricer_models::analytical::ImpliedVolConfig;
///
/// let config = ImpliedVolConfig::default();
/// assert_eq!(config.initial_guess, 0.30);
/// assert_eq!(config.max_iterations, 100);
/// assert_eq!((config.min_vol, config.max_vol), (0.01, 5.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImpliedVolConfig {
    /// Starting volatility σ₀.
    pub initial_guess: f64,
    /// Stop when |model - market| falls below this price difference.
    pub tolerance: f64,
    /// Maximum number of Newton updates.
    pub max_iterations: usize,
    /// Lower clamp for every iterate.
    pub min_vol: f64,
    /// Upper clamp for every iterate.
    pub max_vol: f64,
}

impl Default for ImpliedVolConfig {
    fn default() -> Self {
        Self {
            initial_guess: 0.30,
            tolerance: 1e-4,
            max_iterations: 100,
            min_vol: 0.01,
            max_vol: 5.0,
        }
    }
}

/// Outcome of an implied volatility solve.
///
/// A non-converged result is not an error: `volatility` holds the last
/// iterate, always inside `[min_vol, max_vol]`, and `termination` says why
/// the search stopped.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImpliedVolatility {
    /// Final volatility iterate.
    pub volatility: f64,
    /// Whether the price tolerance was met.
    pub converged: bool,
    /// Newton updates applied.
    pub iterations: usize,
    /// Why the search stopped.
    pub termination: Termination,
}

/// Newton-Raphson implied volatility solver.
///
/// # Examples
/// ```
/// use pricer_models::analytical::{price_option, ImpliedVolConfig, ImpliedVolSolver};
/// use pricer_models::instruments::{OptionSpec, OptionType};
///
/// let spec = OptionSpec::new(100.0, 110.0, 0.75, 0.45, 0.03, OptionType::Put).unwrap();
/// let market = price_option(&spec).price;
///
/// let solver = ImpliedVolSolver::new(ImpliedVolConfig::default()).unwrap();
/// let iv = solver.solve(market, &spec);
/// assert!(iv.converged);
/// assert!((iv.volatility - 0.45).abs() < 1e-3);
/// ```
#[derive(Debug, Clone)]
pub struct ImpliedVolSolver {
    config: ImpliedVolConfig,
    newton: NewtonRaphsonSolver<f64>,
}

impl ImpliedVolSolver {
    /// Creates a solver from `config`.
    ///
    /// # Errors
    /// - `PricingError::InvalidInput` if the tolerance is not positive, the
    ///   iteration budget is zero, or the volatility bounds are not finite
    ///   with `0 < min_vol <= max_vol`
    pub fn new(config: ImpliedVolConfig) -> Result<Self, PricingError> {
        if !(config.tolerance.is_finite() && config.tolerance > 0.0) {
            return Err(PricingError::InvalidInput(format!(
                "Implied volatility tolerance must be positive: {}",
                config.tolerance
            )));
        }
        if config.max_iterations == 0 {
            return Err(PricingError::InvalidInput(
                "Implied volatility iteration budget must be positive".to_string(),
            ));
        }
        if !(config.min_vol.is_finite() && config.max_vol.is_finite())
            || config.min_vol <= 0.0
            || config.min_vol > config.max_vol
        {
            return Err(PricingError::InvalidInput(format!(
                "Invalid volatility bounds: [{}, {}]",
                config.min_vol, config.max_vol
            )));
        }
        if !config.initial_guess.is_finite() {
            return Err(PricingError::InvalidInput(
                "Initial volatility guess must be finite".to_string(),
            ));
        }

        Ok(Self::from_config(config))
    }

    fn from_config(config: ImpliedVolConfig) -> Self {
        let newton = NewtonRaphsonSolver::new(SolverConfig {
            tolerance: config.tolerance,
            max_iterations: config.max_iterations,
        });
        Self { config, newton }
    }

    /// Returns the solver settings.
    pub fn config(&self) -> &ImpliedVolConfig {
        &self.config
    }

    /// Solves for the volatility that reprices `spec` at `market_price`.
    ///
    /// The volatility stored in `spec` is ignored; every other field is
    /// used as given.
    ///
    /// The derivative is the reported vega, rounded to 4 decimals per vol
    /// point. Far from the money a Newton step can overshoot to `min_vol`,
    /// where that rounded vega is exactly zero; the search then stops at
    /// `min_vol` with [`Termination::DerivativeVanished`] and
    /// `converged == false` rather than continuing from another guess.
    pub fn solve(&self, market_price: f64, spec: &OptionSpec) -> ImpliedVolatility {
        let objective = |sigma: f64| {
            let result = price_option(&spec.with_volatility(sigma));
            (
                result.price - market_price,
                result.greeks.vega * VEGA_UNIT_SCALE,
            )
        };

        let outcome = self.newton.find_root_bounded(
            objective,
            self.config.initial_guess,
            self.config.min_vol,
            self.config.max_vol,
        );

        ImpliedVolatility {
            volatility: outcome.root,
            converged: outcome.converged(),
            iterations: outcome.iterations,
            termination: outcome.termination,
        }
    }
}

impl Default for ImpliedVolSolver {
    fn default() -> Self {
        Self::from_config(ImpliedVolConfig::default())
    }
}

/// Implied volatility with the default settings.
///
/// σ₀ = 0.30, price tolerance 1e-4, at most 100 updates, iterates clamped
/// to [0.01, 5.0].
///
/// # Examples
/// ```
/// use pricer_models::analytical::{implied_volatility, price_option};
/// use pricer_models::instruments::{OptionSpec, OptionType};
///
/// let spec = OptionSpec::new(100.0, 100.0, 1.0, 0.2, 0.05, OptionType::Call).unwrap();
/// let iv = implied_volatility(price_option(&spec).price, &spec);
/// assert!(iv.converged);
/// assert!((iv.volatility - 0.2).abs() < 1e-3);
/// ```
pub fn implied_volatility(market_price: f64, spec: &OptionSpec) -> ImpliedVolatility {
    ImpliedVolSolver::default().solve(market_price, spec)
}
