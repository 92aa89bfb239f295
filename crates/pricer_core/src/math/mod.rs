//! Mathematical building blocks.
//!
//! - [`rounding`]: Fixed-decimal rounding for display-precision outputs
//! - [`solvers`]: Root finding used by implied volatility inversion

pub mod rounding;
pub mod solvers;
