//! # pricer_core: Numeric Foundation for the Option Analytics Workspace
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Error types: `PricingError` (`types::error`)
//! - Display rounding helpers (`math::rounding`)
//! - Bounded Newton-Raphson root finding (`math::solvers`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::math::rounding::round_to;
//! use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
//!
//! // Solve x² - 2 = 0 inside [0, 10]
//! let solver = NewtonRaphsonSolver::new(SolverConfig::new(1e-12, 50));
//! let result = solver.find_root_bounded(|x: f64| (x * x - 2.0, 2.0 * x), 1.0, 0.0, 10.0);
//!
//! assert!(result.converged());
//! assert_eq!(round_to(result.root, 4), 1.4142);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for error and solver result types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
