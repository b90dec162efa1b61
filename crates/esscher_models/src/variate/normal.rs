//! Standard normal variate.
//!
//! Tilting a standard normal by `s` shifts its mean to `s`:
//!
//! ```text
//! Φ(x, s) = N(x - s),    κ(s) = s² / 2
//! ```
//!
//! With this family the option engine reproduces Black's formula on the
//! forward, with `s = σ√T`.

use super::{ensure_tilt, Variate};
use crate::analytical::AnalyticalError;
use esscher_core::types::Real;

/// Standard normal variate model.
///
/// Stateless; every tilt is admissible.
///
/// # Examples
/// ```
/// use esscher_models::variate::{Normal, Variate};
///
/// let n = Normal;
/// // N(1.96) ≈ 0.975
/// assert!((n.cdf(1.96_f64, 0.0).unwrap() - 0.975).abs() < 1e-4);
/// // Tilting by s is a shift
/// assert_eq!(n.cdf(1.0_f64, 0.5).unwrap(), n.cdf(0.5_f64, 0.0).unwrap());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Normal;

/// Standard normal cdf `N(x) = erfc(-x/√2) / 2`.
#[inline]
fn norm_cdf<X: Real>(x: X) -> X {
    X::constant(0.5) * (-x * X::FRAC_1_SQRT_2()).erfc()
}

/// Standard normal density `n(x) = exp(-x²/2) / √(2π)`.
#[inline]
fn norm_pdf<X: Real>(x: X) -> X {
    let frac_1_sqrt_2pi = X::FRAC_1_SQRT_2() * X::FRAC_2_SQRT_PI() * X::constant(0.5);
    frac_1_sqrt_2pi * (-x * x * X::constant(0.5)).exp()
}

impl<X: Real> Variate<X> for Normal {
    fn name(&self) -> &'static str {
        "normal"
    }

    #[inline]
    fn tilt_limit(&self) -> X {
        X::infinity()
    }

    fn cumulant(&self, s: X) -> Result<X, AnalyticalError> {
        ensure_tilt(s, X::infinity())?;
        Ok(X::constant(0.5) * s * s)
    }

    fn cdf(&self, x: X, s: X) -> Result<X, AnalyticalError> {
        ensure_tilt(s, X::infinity())?;
        Ok(norm_cdf(x - s))
    }

    fn pdf(&self, x: X, s: X) -> Result<X, AnalyticalError> {
        ensure_tilt(s, X::infinity())?;
        Ok(norm_pdf(x - s))
    }

    fn tilt_derivative(&self, x: X, s: X) -> Result<X, AnalyticalError> {
        ensure_tilt(s, X::infinity())?;
        Ok(-norm_pdf(x - s))
    }

    /// `N(x) - N(x - s)` without cancellation.
    ///
    /// Both arguments on the same side of zero: difference of upper (or
    /// lower) tails via `erfc`. Arguments straddling zero: sum of two `erf`
    /// terms of equal sign.
    fn tilt_mass(&self, x: X, s: X) -> Result<X, AnalyticalError> {
        ensure_tilt(s, X::infinity())?;

        let half = X::constant(0.5);
        let r = X::FRAC_1_SQRT_2();
        let shifted = x - s;

        let mass = if x >= X::zero() && shifted >= X::zero() {
            half * ((shifted * r).erfc() - (x * r).erfc())
        } else if x <= X::zero() && shifted <= X::zero() {
            half * ((-x * r).erfc() - (-shifted * r).erfc())
        } else {
            half * ((x * r).erf() - (shifted * r).erf())
        };
        Ok(mass)
    }
}
