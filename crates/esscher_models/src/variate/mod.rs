//! Variate models: standardized random variables priced under an Esscher tilt.
//!
//! A variate model describes the distribution of a standardized terminal
//! return `X` (mean zero). The option engine only ever sees it through the
//! tilted cumulative distribution
//!
//! ```text
//! Φ(x, s) = P^s(X ≤ x),    dP^s/dP = exp(sX - κ(s))
//! ```
//!
//! together with its derivatives in `x` and `s` and the cumulant
//! generating function `κ(s) = ln E[exp(sX)]`. Any type implementing
//! [`Variate`] is a drop-in argument to
//! [`OptionModel::new`](crate::analytical::OptionModel::new).
//!
//! ## Families
//!
//! - [`Normal`]: standard normal, `Φ(x, s) = N(x - s)`
//! - [`Gamma`]: standardized gamma with shape `α`, including the
//!   exponential (`α = 1`)
//!
//! ## Runtime selection
//!
//! - [`VariateModel`]: type-erased, shareable wrapper
//! - [`VariateConfig`]: serde description of a family that builds a
//!   [`VariateModel`]

pub mod config;
pub mod erased;
pub mod gamma;
pub mod normal;

pub use config::VariateConfig;
pub use erased::VariateModel;
pub use gamma::Gamma;
pub use normal::Normal;

use crate::analytical::AnalyticalError;
use esscher_core::types::Real;

/// Distribution contract consumed by the option engine.
///
/// Every method is a pure function of its arguments and the model's own
/// shape parameters. Inputs for which a quantity is undefined (a tilt
/// where the moment generating function does not exist) are rejected with
/// an [`AnalyticalError`], never clamped.
///
/// # Invariants
///
/// - `cdf(x, 0)` is the untilted distribution function
/// - `pdf(x, s) = pdf(x, 0) · exp(s x - κ(s))`
/// - `pdf = ∂cdf/∂x ≥ 0` and `tilt_derivative = ∂cdf/∂s`
///
/// # Examples
/// ```
/// use esscher_models::variate::{Normal, Variate};
///
/// let n = Normal;
/// let p: f64 = n.cdf(0.0, 0.0).unwrap();
/// assert!((p - 0.5).abs() < 1e-15);
/// assert!((n.cumulant(0.1_f64).unwrap() - 0.005).abs() < 1e-15);
/// ```
pub trait Variate<X: Real> {
    /// Family name, as used in configuration and logs.
    fn name(&self) -> &'static str;

    /// Supremum of admissible tilts; `κ(s)` is finite exactly for `s < tilt_limit()`.
    fn tilt_limit(&self) -> X;

    /// Cumulant generating function `κ(s) = ln E[exp(sX)]`.
    fn cumulant(&self, s: X) -> Result<X, AnalyticalError>;

    /// Tilted distribution function `Φ(x, s)`.
    fn cdf(&self, x: X, s: X) -> Result<X, AnalyticalError>;

    /// Tilted density `∂Φ/∂x`.
    fn pdf(&self, x: X, s: X) -> Result<X, AnalyticalError>;

    /// Tilt sensitivity `∂Φ/∂s`.
    fn tilt_derivative(&self, x: X, s: X) -> Result<X, AnalyticalError>;

    /// Probability mass moved across `x` by the tilt: `Φ(x, 0) - Φ(x, s)`.
    ///
    /// The default subtracts the two distribution values. Families with a
    /// closed form free of cancellation override it; the engine's
    /// out-of-the-money value is built on this quantity.
    fn tilt_mass(&self, x: X, s: X) -> Result<X, AnalyticalError> {
        Ok(self.cdf(x, X::zero())? - self.cdf(x, s)?)
    }
}

impl<X: Real, V: Variate<X> + ?Sized> Variate<X> for &V {
    #[inline]
    fn name(&self) -> &'static str {
        (**self).name()
    }

    #[inline]
    fn tilt_limit(&self) -> X {
        (**self).tilt_limit()
    }

    #[inline]
    fn cumulant(&self, s: X) -> Result<X, AnalyticalError> {
        (**self).cumulant(s)
    }

    #[inline]
    fn cdf(&self, x: X, s: X) -> Result<X, AnalyticalError> {
        (**self).cdf(x, s)
    }

    #[inline]
    fn pdf(&self, x: X, s: X) -> Result<X, AnalyticalError> {
        (**self).pdf(x, s)
    }

    #[inline]
    fn tilt_derivative(&self, x: X, s: X) -> Result<X, AnalyticalError> {
        (**self).tilt_derivative(x, s)
    }

    #[inline]
    fn tilt_mass(&self, x: X, s: X) -> Result<X, AnalyticalError> {
        (**self).tilt_mass(x, s)
    }
}

/// Rejects tilts outside `(-∞, limit)`, including NaN and infinities.
#[inline]
pub(crate) fn ensure_tilt<X: Real>(s: X, limit: X) -> Result<(), AnalyticalError> {
    if s.is_finite() && s < limit {
        Ok(())
    } else {
        Err(AnalyticalError::TiltOutOfRange {
            tilt: s.as_f64(),
            limit: limit.as_f64(),
        })
    }
}
