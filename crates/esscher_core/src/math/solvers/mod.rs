//! Root-finding solvers for numerical computation.
//!
//! Designed for inverting pricing functions (implied scale from a quoted
//! price) where the analytic derivative is available.
//!
//! ## Available Solvers
//!
//! - [`NewtonRaphsonSolver`]: Quadratic convergence using derivatives, with a
//!   bounded variant that bisects toward the violated bound instead of leaving
//!   the admissible interval
//!
//! ## Configuration
//!
//! Solvers use [`SolverConfig`] for configuring:
//! - `tolerance`: Convergence tolerance (default: 1e-10)
//! - `max_iterations`: Maximum iteration count (default: 100)
//!
//! ## Examples
//!
//! ```
//! use esscher_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
//! use esscher_core::types::SolverError;
//!
//! // Solve x² - 2 = 0 (find √2)
//! let solver = NewtonRaphsonSolver::new(SolverConfig::default());
//!
//! let f = |x: f64| Ok::<_, SolverError>(x * x - 2.0);
//! let f_prime = |x: f64| Ok(2.0 * x);
//!
//! let root = solver.find_root(f, f_prime, 1.0).unwrap();
//! assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
//! ```

mod config;
mod newton_raphson;

// Re-export public types at module level
pub use config::SolverConfig;
pub use newton_raphson::NewtonRaphsonSolver;
