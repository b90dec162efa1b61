//! # esscher_models: Variate Models and the Option Engine (L2: Business Logic)
//!
//! European option values and Greeks under a pricing model that is generic
//! over the distribution of the underlying's standardized terminal return.
//!
//! This crate provides:
//! - The variate contract ([`variate::Variate`]) and its families: normal,
//!   gamma and exponential
//! - Runtime family selection ([`variate::VariateModel`],
//!   [`variate::VariateConfig`])
//! - Call and put payoffs ([`instruments`])
//! - The option engine ([`analytical::OptionModel`])
//!
//! ## Usage Examples
//!
//! ```rust
//! use esscher_models::analytical::OptionModel;
//! use esscher_models::instruments::{Call, Put};
//! use esscher_models::variate::{Gamma, Normal, VariateConfig};
//!
//! // Compile-time family
//! let black = OptionModel::new(Normal);
//! let put = black.value(100.0_f64, 0.1, &Put::new(100.0)).unwrap();
//! assert!((put - 3.987_761_167_674_492).abs() < 1e-12);
//!
//! // Skewed family, same formulas
//! let skewed = OptionModel::new(Gamma::new(4.0).unwrap());
//! let call = skewed.value(100.0_f64, 0.2, &Call::new(110.0)).unwrap();
//! assert!(call > 0.0);
//!
//! // Runtime family
//! let model = OptionModel::new("gamma:4".parse::<VariateConfig>().unwrap().build::<f64>().unwrap());
//! assert_eq!(model.value(100.0, 0.2, &Call::new(110.0)).unwrap(), call);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Serialisation for payoffs, Greeks and `VariateConfig`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
pub mod variate;
