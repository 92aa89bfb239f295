//! Root-finding solvers for numerical computation.
//!
//! ## Available Solvers
//!
//! - [`NewtonRaphsonSolver`]: Bounded Newton iteration with an explicit
//!   derivative, used for implied volatility inversion
//!
//! ## Configuration
//!
//! Solvers use [`SolverConfig`] for configuring:
//! - `tolerance`: Convergence tolerance on `|f(x)|` (default: 1e-10)
//! - `max_iterations`: Maximum iteration count (default: 100)
//!
//! ## Outcome Reporting
//!
//! Exhausting the iteration budget or hitting a flat derivative is not an
//! error: the solver returns its last iterate together with a
//! [`Termination`] reason so callers can decide how much to trust it.
//!
//! ## Examples
//!
//! ```
//! use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig, Termination};
//!
//! let solver = NewtonRaphsonSolver::new(SolverConfig::default());
//!
//! // Solve x² - 2 = 0 (find √2), iterates kept inside [0, 4]
//! let result = solver.find_root_bounded(|x: f64| (x * x - 2.0, 2.0 * x), 1.0, 0.0, 4.0);
//!
//! assert_eq!(result.termination, Termination::Converged);
//! assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
//! ```

mod config;
mod newton_raphson;

// Re-export public types at module level
pub use config::SolverConfig;
pub use newton_raphson::{NewtonRaphsonSolver, NewtonResult, Termination};
