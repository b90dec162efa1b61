//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors from pricing operations
//! - `SolverError`: Errors from root-finding solvers

use std::fmt;
use thiserror::Error;

/// Categorised pricing errors.
///
/// Provides structured error handling for pricing operations with
/// descriptive context for each failure mode.
///
/// # Variants
/// - `InvalidInput`: Invalid market data or parameters
/// - `NumericalInstability`: Computation failed to converge
/// - `ModelFailure`: Model assumptions violated
///
/// # Examples
/// ```
/// use esscher_core::types::PricingError;
///
/// let err = PricingError::InvalidInput("Negative forward price".to_string());
/// assert_eq!(format!("{}", err), "Invalid input: Negative forward price");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Invalid input data or parameters
    InvalidInput(String),

    /// Numerical instability during computation
    NumericalInstability(String),

    /// Model failed to produce valid result
    ModelFailure(String),
}

impl fmt::Display for PricingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            PricingError::NumericalInstability(msg) => {
                write!(f, "Numerical instability: {}", msg)
            }
            PricingError::ModelFailure(msg) => write!(f, "Model failure: {}", msg),
        }
    }
}

impl std::error::Error for PricingError {}

/// Root-finding solver errors.
///
/// # Variants
/// - `MaxIterationsExceeded`: Solver failed to converge within iteration limit
/// - `DerivativeNearZero`: Derivative too small for Newton-Raphson
/// - `InvalidBounds`: Initial guess does not lie strictly inside the search interval
/// - `NumericalInstability`: General numerical instability
///
/// # Examples
/// ```
/// use esscher_core::types::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded { iterations: 100 };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// Solver failed to converge within maximum iterations.
    #[error("Failed to converge after {iterations} iterations")]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
    },

    /// Derivative near zero (division by zero risk in Newton-Raphson).
    #[error("Derivative near zero at x = {x}")]
    DerivativeNearZero {
        /// The x value where derivative was near zero
        x: f64,
    },

    /// Initial guess outside the open search interval.
    #[error("Initial guess {x0} outside search interval ({lower}, {upper})")]
    InvalidBounds {
        /// Initial guess
        x0: f64,
        /// Lower bound (exclusive)
        lower: f64,
        /// Upper bound (exclusive)
        upper: f64,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

impl From<SolverError> for PricingError {
    fn from(err: SolverError) -> Self {
        match err {
            SolverError::InvalidBounds { .. } => PricingError::InvalidInput(err.to_string()),
            _ => PricingError::NumericalInstability(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_error_display() {
        let err = PricingError::InvalidInput("strike must be positive".to_string());
        assert_eq!(format!("{}", err), "Invalid input: strike must be positive");

        let err = PricingError::NumericalInstability("scale underflow".to_string());
        assert_eq!(format!("{}", err), "Numerical instability: scale underflow");

        let err = PricingError::ModelFailure("tilt outside mgf domain".to_string());
        assert_eq!(format!("{}", err), "Model failure: tilt outside mgf domain");
    }

    #[test]
    fn test_pricing_error_is_std_error() {
        let err = PricingError::ModelFailure("x".to_string());
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn test_solver_error_display() {
        let err = SolverError::MaxIterationsExceeded { iterations: 42 };
        assert_eq!(format!("{}", err), "Failed to converge after 42 iterations");

        let err = SolverError::DerivativeNearZero { x: 1.5 };
        assert_eq!(format!("{}", err), "Derivative near zero at x = 1.5");

        let err = SolverError::InvalidBounds {
            x0: 3.0,
            lower: 0.0,
            upper: 2.0,
        };
        assert_eq!(
            format!("{}", err),
            "Initial guess 3 outside search interval (0, 2)"
        );
    }

    #[test]
    fn test_solver_error_to_pricing_error() {
        let err: PricingError = SolverError::MaxIterationsExceeded { iterations: 7 }.into();
        match err {
            PricingError::NumericalInstability(msg) => assert!(msg.contains("7 iterations")),
            other => panic!("Expected NumericalInstability, got {:?}", other),
        }

        let err: PricingError = SolverError::InvalidBounds {
            x0: -1.0,
            lower: 0.0,
            upper: 1.0,
        }
        .into();
        assert!(matches!(err, PricingError::InvalidInput(_)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_solver_error_serialises() {
        fn assert_serde<T: serde::Serialize + for<'de> serde::Deserialize<'de>>() {}
        assert_serde::<SolverError>();
    }
}
