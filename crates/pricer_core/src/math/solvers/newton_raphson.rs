//! Bounded Newton-Raphson root-finding solver.

use super::SolverConfig;
use num_traits::Float;

/// Derivative magnitude below which a Newton step is not attempted.
const DERIVATIVE_FLOOR: f64 = 1e-30;

/// Reason a Newton iteration stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Termination {
    /// `|f(x)| < tolerance` at the returned point.
    Converged,
    /// The derivative vanished; the last iterate is returned as a best effort.
    DerivativeVanished,
    /// The objective or its derivative was NaN or infinite.
    NonFinite,
    /// The iteration budget was exhausted.
    MaxIterations,
}

/// Outcome of a bounded Newton solve.
///
/// `iterations` counts Newton updates actually applied, so a starting point
/// that already satisfies the tolerance reports zero.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NewtonResult<T> {
    /// Final iterate.
    pub root: T,
    /// Number of Newton updates applied.
    pub iterations: usize,
    /// Why the iteration stopped.
    pub termination: Termination,
}

impl<T> NewtonResult<T> {
    /// Returns `true` if the residual tolerance was met.
    #[inline]
    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }
}

/// Newton-Raphson root finder with iterate clamping.
///
/// Uses Newton's method: `x_{n+1} = clamp(x_n - f(x_n) / f'(x_n), lower, upper)`.
///
/// # Convergence
///
/// Newton-Raphson converges quadratically near a root. Clamping keeps the
/// iterate inside a region where the objective is well defined, but the
/// method may still stall if:
/// - The derivative is near zero
/// - The initial guess is far from the root
/// - The root lies outside `[lower, upper]`
///
/// None of these are errors; the returned [`NewtonResult`] records which
/// case applied.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
///
/// let solver = NewtonRaphsonSolver::new(SolverConfig::default());
///
/// // Solve x³ - x - 2 = 0
/// let result = solver.find_root_bounded(
///     |x: f64| (x * x * x - x - 2.0, 3.0 * x * x - 1.0),
///     1.5,
///     -10.0,
///     10.0,
/// );
/// assert!(result.converged());
/// ```
#[derive(Debug, Clone)]
pub struct NewtonRaphsonSolver<T: Float> {
    config: SolverConfig<T>,
}

impl<T: Float> NewtonRaphsonSolver<T> {
    /// Create a new Newton-Raphson solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: SolverConfig::default(),
        }
    }

    /// Find a root of `f` keeping every iterate inside `[lower, upper]`.
    ///
    /// `eval` returns `(f(x), f'(x))` from a single evaluation, which lets
    /// callers share work between the value and its derivative.
    ///
    /// # Arguments
    ///
    /// * `eval` - Objective and derivative at `x`
    /// * `x0` - Initial guess (clamped into the bounds before use)
    /// * `lower` - Lower clamp for iterates
    /// * `upper` - Upper clamp for iterates
    ///
    /// # Panics
    ///
    /// Panics if `lower > upper`.
    pub fn find_root_bounded<F>(&self, mut eval: F, x0: T, lower: T, upper: T) -> NewtonResult<T>
    where
        F: FnMut(T) -> (T, T),
    {
        assert!(lower <= upper, "lower bound must not exceed upper bound");

        let floor = T::from(DERIVATIVE_FLOOR).unwrap();
        let mut x = clamp(x0, lower, upper);

        for iteration in 0..self.config.max_iterations {
            let (f_val, f_prime_val) = eval(x);

            if !f_val.is_finite() || !f_prime_val.is_finite() {
                return NewtonResult {
                    root: x,
                    iterations: iteration,
                    termination: Termination::NonFinite,
                };
            }

            if f_val.abs() < self.config.tolerance {
                return NewtonResult {
                    root: x,
                    iterations: iteration,
                    termination: Termination::Converged,
                };
            }

            if f_prime_val.abs() < floor {
                return NewtonResult {
                    root: x,
                    iterations: iteration,
                    termination: Termination::DerivativeVanished,
                };
            }

            x = clamp(x - f_val / f_prime_val, lower, upper);
        }

        NewtonResult {
            root: x,
            iterations: self.config.max_iterations,
            termination: Termination::MaxIterations,
        }
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }
}

#[inline]
fn clamp<T: Float>(x: T, lower: T, upper: T) -> T {
    if x < lower {
        lower
    } else if x > upper {
        upper
    } else {
        x
    }
}
