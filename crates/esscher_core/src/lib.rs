//! # esscher_core: Numeric Foundation for the Esscher Option Engine
//!
//! ## Layer 1 (Foundation) Role
//!
//! esscher_core is the bottom layer of the workspace, providing:
//! - The [`Real`](types::Real) numeric trait (`f32`, `f64`) with the error function
//! - Error types: `PricingError`, `SolverError` (`types::error`)
//! - Newton-Raphson root finding (`math::solvers`)
//! - Derivative-consistency checking for analytic sensitivities (`math::verify`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other esscher_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - libm: Double precision error function
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use esscher_core::math::verify::derivative_range;
//! use esscher_core::types::Real;
//!
//! fn normal_cdf<X: Real>(x: X) -> X {
//!     X::constant(0.5) * (-x / X::SQRT_2()).erfc()
//! }
//!
//! // d/dx x³ = 3x², checked by centred differences on [0, 1]
//! let range = derivative_range(|x: f64| x * x * x, |x| 3.0 * x * x, 1e-3, 0.0, 1.0, 0.1);
//! assert!(range.max_abs() < 1e-5);
//!
//! assert!((normal_cdf(0.0_f64) - 0.5).abs() < 1e-15);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for error types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
