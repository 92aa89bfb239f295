//! # Pricer Models (L2: Business Logic)
//!
//! European option analytics under Black-Scholes-Merton dynamics.
//!
//! This crate provides:
//! - Instrument definitions (`OptionSpec`, `OptionType`, `Position`)
//! - Payoff profiles at expiry over a price grid
//! - Closed-form pricing and Greeks with a continuous dividend yield
//! - Implied volatility inversion with an explicit convergence status
//!
//! ## Design Principles
//!
//! - **Closed enums** for option type and position, parsed at the boundary
//! - **Pure functions**: every evaluation is stateless and thread-safe
//! - **Uniform results**: degenerate inputs (expiry, zero volatility) return
//!   the same `PricingResult` shape as the general formula
//!
//! ## Quick Start
//!
//! ```
//! use pricer_models::analytical::{implied_volatility, price_option};
//! use pricer_models::instruments::{OptionSpec, OptionType};
//!
//! let spec = OptionSpec::new(100.0, 100.0, 1.0, 0.2, 0.05, OptionType::Call).unwrap();
//! let result = price_option(&spec);
//! assert!((result.price - 10.45).abs() < 0.1);
//!
//! let iv = implied_volatility(result.price, &spec);
//! assert!(iv.converged);
//! assert!((iv.volatility - 0.2).abs() < 1e-3);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
