//! Core numeric and error types.
//!
//! This module provides:
//! - `real`: The [`Real`] floating-point trait used by every pricing formula
//! - `error`: Structured error types for pricing and solver operations
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`Real`] from `real`
//! - [`PricingError`], [`SolverError`] from `error`

pub mod error;
pub mod real;

// Re-export commonly used types at module level
pub use error::{PricingError, SolverError};
pub use real::Real;
