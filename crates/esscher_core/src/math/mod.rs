//! Numerical building blocks.
//!
//! - [`solvers`]: Newton-Raphson root finding (implied scale inversion)
//! - [`verify`]: Finite-difference checks of analytic derivatives

pub mod solvers;
pub mod verify;
