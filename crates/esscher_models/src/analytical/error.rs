//! Error types for analytical pricing operations.
//!
//! This module provides:
//! - `AnalyticalError`: Domain errors raised by variate models and the option engine

use esscher_core::types::{PricingError, SolverError};
use thiserror::Error;

/// Analytical pricing errors.
///
/// Every variant is raised at the point of detection; no operation returns
/// NaN or a sentinel in place of an error.
///
/// # Variants
/// - `InvalidForward`: Non-positive or non-finite forward price
/// - `InvalidStrike`: Non-positive or non-finite strike
/// - `InvalidScale`: Non-positive or non-finite volatility-scale
/// - `TiltOutOfRange`: Tilt outside the variate's moment generating function domain
/// - `InvalidShape`: Invalid distribution shape parameter
/// - `InvalidPrice`: Quoted price outside the no-arbitrage band
/// - `MoneynessOverflow`: Moneyness not representable for finite inputs
/// - `Solver`: Implied scale inversion failed
///
/// # Examples
/// ```
/// use esscher_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidScale { scale: 0.0 };
/// assert!(format!("{}", err).contains("scale"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Invalid forward price (must be positive and finite).
    #[error("Invalid forward price: f = {forward}")]
    InvalidForward {
        /// The invalid forward value
        forward: f64,
    },

    /// Invalid strike (must be positive and finite).
    #[error("Invalid strike: k = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid volatility-scale (must be positive and finite).
    #[error("Invalid volatility scale: s = {scale}")]
    InvalidScale {
        /// The invalid scale value
        scale: f64,
    },

    /// Tilt outside the domain where the moment generating function exists.
    #[error("Tilt s = {tilt} outside admissible range (-inf, {limit})")]
    TiltOutOfRange {
        /// The offending tilt
        tilt: f64,
        /// Supremum of admissible tilts
        limit: f64,
    },

    /// Invalid distribution shape parameter.
    #[error("Invalid shape parameter: {shape}")]
    InvalidShape {
        /// The invalid shape value
        shape: f64,
    },

    /// Quoted option price outside the no-arbitrage band.
    #[error("Price {price} outside no-arbitrage band ({lower}, {upper})")]
    InvalidPrice {
        /// The quoted price
        price: f64,
        /// Intrinsic value (exclusive lower bound)
        lower: f64,
        /// Exclusive upper bound (forward for calls, strike for puts)
        upper: f64,
    },

    /// Cumulant or moneyness overflowed for otherwise valid inputs.
    #[error("Moneyness overflow: f = {forward}, s = {scale}, k = {strike}")]
    MoneynessOverflow {
        /// Forward price
        forward: f64,
        /// Volatility-scale
        scale: f64,
        /// Strike
        strike: f64,
    },

    /// Implied scale root search failed.
    #[error("Implied scale search failed: {0}")]
    Solver(#[from] SolverError),
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        match err {
            AnalyticalError::InvalidForward { .. }
            | AnalyticalError::InvalidStrike { .. }
            | AnalyticalError::InvalidScale { .. }
            | AnalyticalError::InvalidPrice { .. } => PricingError::InvalidInput(err.to_string()),
            AnalyticalError::TiltOutOfRange { .. } | AnalyticalError::InvalidShape { .. } => {
                PricingError::ModelFailure(err.to_string())
            }
            AnalyticalError::MoneynessOverflow { .. } | AnalyticalError::Solver(_) => {
                PricingError::NumericalInstability(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_forward_display() {
        let err = AnalyticalError::InvalidForward { forward: -100.0 };
        assert_eq!(format!("{}", err), "Invalid forward price: f = -100");
    }

    #[test]
    fn test_invalid_scale_display() {
        let err = AnalyticalError::InvalidScale { scale: 0.0 };
        assert_eq!(format!("{}", err), "Invalid volatility scale: s = 0");
    }

    #[test]
    fn test_tilt_out_of_range_display() {
        let err = AnalyticalError::TiltOutOfRange {
            tilt: 2.5,
            limit: 2.0,
        };
        assert_eq!(
            format!("{}", err),
            "Tilt s = 2.5 outside admissible range (-inf, 2)"
        );
    }

    #[test]
    fn test_solver_error_wrapped() {
        let err: AnalyticalError = SolverError::MaxIterationsExceeded { iterations: 9 }.into();
        assert!(format!("{}", err).contains("9 iterations"));
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = AnalyticalError::InvalidStrike { strike: 0.0 };
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn test_to_pricing_error() {
        let err: PricingError = AnalyticalError::InvalidStrike { strike: -1.0 }.into();
        match err {
            PricingError::InvalidInput(msg) => assert!(msg.contains("strike")),
            other => panic!("Expected InvalidInput variant, got {:?}", other),
        }

        let err: PricingError = AnalyticalError::InvalidShape { shape: -2.0 }.into();
        assert!(matches!(err, PricingError::ModelFailure(_)));

        let err: PricingError =
            AnalyticalError::from(SolverError::DerivativeNearZero { x: 0.1 }).into();
        assert!(matches!(err, PricingError::NumericalInstability(_)));

        let err: PricingError = AnalyticalError::MoneynessOverflow {
            forward: 100.0,
            scale: 1e200,
            strike: 100.0,
        }
        .into();
        match err {
            PricingError::NumericalInstability(msg) => assert!(msg.contains("s = 1e200")),
            other => panic!("Expected NumericalInstability variant, got {:?}", other),
        }
    }
}
