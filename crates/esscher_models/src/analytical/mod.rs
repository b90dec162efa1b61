//! Closed-form pricing of European options under an Esscher-tilted variate.
//!
//! This module provides:
//! - [`OptionModel`]: moneyness, value, delta, gamma, vega and implied scale
//!   for any [`Variate`](crate::variate::Variate)
//! - [`Greeks`]: value and sensitivities from one evaluation
//! - [`AnalyticalError`]: domain errors shared with the variate models
//!
//! ## Design Principles
//!
//! - **Generic over the distribution**: formulas are written once against the
//!   variate contract; no family is special-cased
//! - **Generic over `X: Real`**: `f32` and `f64`
//! - **Analytic Greeks**: no finite differences on any pricing path

pub mod error;
pub mod option;

pub use error::AnalyticalError;
pub use option::{Greeks, OptionModel};
