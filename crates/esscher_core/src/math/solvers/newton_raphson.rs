//! Newton-Raphson root-finding solver.

use super::SolverConfig;
use crate::types::SolverError;
use num_traits::Float;

/// Newton-Raphson root finder.
///
/// Uses Newton's method: `x_{n+1} = x_n - f(x_n) / f'(x_n)` for fast
/// quadratic convergence on smooth functions.
///
/// Objective and derivative are fallible: pricing functions reject
/// arguments outside their domain, and such an error aborts the search and
/// is returned unchanged. The error type only has to absorb
/// [`SolverError`].
///
/// # Example
///
/// ```
/// use esscher_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
/// use esscher_core::types::SolverError;
///
/// let solver = NewtonRaphsonSolver::new(SolverConfig::default());
///
/// // Solve e^x - 2 = 0 on (0, 10)
/// let root = solver
///     .find_root_bounded(
///         |x: f64| Ok::<_, SolverError>(x.exp() - 2.0),
///         |x| Ok(x.exp()),
///         5.0,
///         0.0,
///         10.0,
///     )
///     .unwrap();
/// assert!((root - 2.0_f64.ln()).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct NewtonRaphsonSolver<T: Float> {
    /// Solver configuration
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

    /// Find a root of `f` using explicit derivative `f_prime`.
    ///
    /// # Returns
    ///
    /// * `Ok(x)` - Root where `|f(x)| < tolerance`
    /// * `Err(SolverError::MaxIterationsExceeded)` - Failed to converge
    /// * `Err(SolverError::DerivativeNearZero)` - Derivative too small
    /// * `Err(e)` - `f` or `f_prime` failed
    pub fn find_root<F, G, E>(&self, f: F, f_prime: G, x0: T) -> Result<T, E>
    where
        F: FnMut(T) -> Result<T, E>,
        G: FnMut(T) -> Result<T, E>,
        E: From<SolverError>,
    {
        self.find_root_bounded(f, f_prime, x0, T::neg_infinity(), T::infinity())
    }

    /// Find a root of `f` inside the open interval `(lower, upper)`.
    ///
    /// A Newton step that would land on or beyond a bound is replaced by the
    /// midpoint between the current iterate and that bound, so every
    /// evaluation happens strictly inside the interval.
    ///
    /// # Errors
    ///
    /// * `SolverError::InvalidBounds` - `x0` not strictly inside `(lower, upper)`
    /// * Otherwise as [`find_root`](Self::find_root)
    pub fn find_root_bounded<F, G, E>(
        &self,
        mut f: F,
        mut f_prime: G,
        x0: T,
        lower: T,
        upper: T,
    ) -> Result<T, E>
    where
        F: FnMut(T) -> Result<T, E>,
        G: FnMut(T) -> Result<T, E>,
        E: From<SolverError>,
    {
        if !(lower < x0 && x0 < upper) {
            return Err(SolverError::InvalidBounds {
                x0: x0.to_f64().unwrap_or(f64::NAN),
                lower: lower.to_f64().unwrap_or(f64::NAN),
                upper: upper.to_f64().unwrap_or(f64::NAN),
            }
            .into());
        }

        let half = T::one() / (T::one() + T::one());
        let tiny = T::min_positive_value();
        let mut x = x0;

        for _iteration in 0..self.config.max_iterations {
            let f_val = f(x)?;

            // Check for convergence
            if f_val.abs() < self.config.tolerance {
                return Ok(x);
            }

            let f_prime_val = f_prime(x)?;

            // Check for near-zero derivative
            if f_prime_val.abs() < tiny {
                return Err(SolverError::DerivativeNearZero {
                    x: x.to_f64().unwrap_or(f64::NAN),
                }
                .into());
            }

            let mut next = x - f_val / f_prime_val;

            // Check for non-finite values
            if !next.is_finite() {
                return Err(SolverError::NumericalInstability(
                    "Newton iteration produced non-finite value".to_string(),
                )
                .into());
            }

            // Stay strictly inside the interval
            if next <= lower {
                next = (x + lower) * half;
            } else if next >= upper {
                next = (x + upper) * half;
            }

            let step = (next - x).abs();
            x = next;

            if step <= self.config.tolerance * x.abs().max(T::one()) {
                return Ok(x);
            }
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        }
        .into())
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }
}
