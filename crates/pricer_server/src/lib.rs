//! REST API server for European option analytics
//!
//! This crate exposes the `pricer_models` analytics over HTTP: Black-Scholes
//! pricing with Greeks, expiry payoff profiles and implied volatility.
//! Requests are validated and unit-normalised here; the numeric core never
//! sees free-form text or percentage inputs.

pub mod config;
pub mod error;
pub mod routes;
pub mod server;

// Re-export pricer dependencies for integration
pub use pricer_core;
pub use pricer_models;

/// Server version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
