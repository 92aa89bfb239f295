//! Analytical pricing formulas for European options.
//!
//! This module provides:
//! - Standard normal CDF/PDF ([`norm_cdf`], [`norm_pdf`])
//! - The Black-Scholes-Merton model with continuous dividend yield
//! - Analytical Greeks (Delta, Gamma, Vega, Theta, Rho)
//! - Implied volatility inversion via bounded Newton-Raphson
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`**: the model and distributions work with
//!   `f64` and `f32`
//! - **Uniform results**: [`price_option`] always returns a [`PricingResult`];
//!   degenerate inputs are flagged through [`PricingRegime`]
//! - **Explicit convergence**: [`implied_volatility`] reports whether and why
//!   the search stopped instead of returning a bare number

pub mod black_scholes;
pub mod distributions;
pub mod implied_vol;
pub mod result;

// Re-export main types at module level
pub use black_scholes::{price_option, raw_greeks, BlackScholes};
pub use distributions::{norm_cdf, norm_pdf};
pub use implied_vol::{implied_volatility, ImpliedVolConfig, ImpliedVolSolver, ImpliedVolatility};
pub use result::{Greeks, PricingRegime, PricingResult};
