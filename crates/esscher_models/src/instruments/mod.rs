//! Payoff definitions for European options.
//!
//! - [`Call`] and [`Put`]: statically typed payoffs
//! - [`Vanilla`]: call or put selected at runtime
//! - [`Payoff`]: the trait the option engine prices against
//!
//! # Examples
//!
//! ```
//! use esscher_models::instruments::{Call, Payoff, PayoffType, Put};
//!
//! let call = Call::new(100.0_f64);
//! let put = Put::new(100.0_f64);
//! assert_eq!(call.payoff_type(), PayoffType::Call);
//! assert_eq!(call.intrinsic(105.0) - put.intrinsic(105.0), 5.0);
//! ```

pub mod payoff;

pub use payoff::{Call, Payoff, PayoffType, Put, Vanilla};
