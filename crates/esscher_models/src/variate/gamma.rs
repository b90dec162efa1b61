//! Standardized gamma variate.
//!
//! `X = (G - α) / √α` with `G ~ Gamma(α, 1)`, so `X` has mean zero, unit
//! variance and skewness `2/√α`. The Esscher tilt by `s` keeps `G` in the
//! gamma family with rate `β = 1 - s/√α`, which is positive exactly when
//! `s < √α`.
//!
//! Writing `y = α + √α x` for the point in `G` space:
//!
//! ```text
//! Φ(x, s)   = P(α, β y)                              (regularized lower incomplete gamma)
//! ∂Φ/∂x     = √α β^α y^(α-1) e^(-βy) / Γ(α)
//! ∂Φ/∂s     = -y^α β^(α-1) e^(-βy) / (√α Γ(α))
//! κ(s)      = -s√α - α ln(1 - s/√α)
//! ```
//!
//! Special functions are evaluated in `f64` through `statrs` and rounded
//! once to the caller's precision.

use statrs::function::gamma::{gamma_lr, ln_gamma};

use super::{ensure_tilt, Variate};
use crate::analytical::AnalyticalError;
use esscher_core::types::Real;

/// Standardized gamma variate model with shape `α > 0`.
///
/// # Examples
/// ```
/// use esscher_models::variate::{Gamma, Variate};
///
/// let g = Gamma::new(4.0).unwrap();
/// assert_eq!(<Gamma as Variate<f64>>::tilt_limit(&g), 2.0);
///
/// // Exponential: P(X ≤ 0) = 1 - e^{-1}
/// let e = Gamma::exponential();
/// let p: f64 = e.cdf(0.0, 0.0).unwrap();
/// assert!((p - (1.0 - (-1.0_f64).exp())).abs() < 1e-14);
///
/// assert!(Gamma::new(0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gamma {
    shape: f64,
    sqrt_shape: f64,
    ln_gamma_shape: f64,
}

impl Gamma {
    /// Creates a standardized gamma variate.
    ///
    /// # Errors
    ///
    /// `AnalyticalError::InvalidShape` unless `shape` is positive and finite.
    pub fn new(shape: f64) -> Result<Self, AnalyticalError> {
        if !(shape.is_finite() && shape > 0.0) {
            return Err(AnalyticalError::InvalidShape { shape });
        }
        Ok(Self::with_shape(shape))
    }

    /// Standardized exponential: `X = E - 1`, `E ~ Exp(1)`.
    pub fn exponential() -> Self {
        Self::with_shape(1.0)
    }

    fn with_shape(shape: f64) -> Self {
        Self {
            shape,
            sqrt_shape: shape.sqrt(),
            ln_gamma_shape: ln_gamma(shape),
        }
    }

    /// Shape parameter `α`.
    #[inline]
    pub fn shape(&self) -> f64 {
        self.shape
    }

    /// Tilted rate `β = 1 - s/√α`, validating the tilt.
    #[inline]
    fn rate(&self, s: f64) -> Result<f64, AnalyticalError> {
        ensure_tilt(s, self.sqrt_shape)?;
        Ok(1.0 - s / self.sqrt_shape)
    }

    /// Point in `G` space corresponding to `x`.
    #[inline]
    fn point(&self, x: f64) -> f64 {
        self.shape + self.sqrt_shape * x
    }

    /// `ln(β^a y^b e^(-βy) / Γ(α))`.
    #[inline]
    fn log_kernel(&self, beta: f64, y: f64, a: f64, b: f64) -> f64 {
        a * beta.ln() + b * y.ln() - beta * y - self.ln_gamma_shape
    }
}

impl<X: Real> Variate<X> for Gamma {
    fn name(&self) -> &'static str {
        if self.shape == 1.0 {
            "exponential"
        } else {
            "gamma"
        }
    }

    #[inline]
    fn tilt_limit(&self) -> X {
        X::constant(self.sqrt_shape)
    }

    fn cumulant(&self, s: X) -> Result<X, AnalyticalError> {
        let s = s.as_f64();
        ensure_tilt(s, self.sqrt_shape)?;
        let kappa = -s * self.sqrt_shape - self.shape * (-s / self.sqrt_shape).ln_1p();
        Ok(X::constant(kappa))
    }

    fn cdf(&self, x: X, s: X) -> Result<X, AnalyticalError> {
        let beta = self.rate(s.as_f64())?;
        let y = self.point(x.as_f64());
        let p = if !(y > 0.0) {
            0.0
        } else if y.is_infinite() {
            1.0
        } else {
            gamma_lr(self.shape, beta * y)
        };
        Ok(X::constant(p))
    }

    fn pdf(&self, x: X, s: X) -> Result<X, AnalyticalError> {
        let beta = self.rate(s.as_f64())?;
        let y = self.point(x.as_f64());
        if !(y > 0.0 && y.is_finite()) {
            return Ok(X::zero());
        }
        let log_density = self.log_kernel(beta, y, self.shape, self.shape - 1.0);
        Ok(X::constant(self.sqrt_shape * log_density.exp()))
    }

    fn tilt_derivative(&self, x: X, s: X) -> Result<X, AnalyticalError> {
        let beta = self.rate(s.as_f64())?;
        let y = self.point(x.as_f64());
        if !(y > 0.0 && y.is_finite()) {
            return Ok(X::zero());
        }
        let log_mass = self.log_kernel(beta, y, self.shape - 1.0, self.shape);
        Ok(X::constant(-log_mass.exp() / self.sqrt_shape))
    }

    /// Closed form `e^(-y) expm1(s y)` for the exponential, subtraction otherwise.
    fn tilt_mass(&self, x: X, s: X) -> Result<X, AnalyticalError> {
        if self.shape != 1.0 {
            return Ok(self.cdf(x, X::zero())? - self.cdf(x, s)?);
        }
        let s = s.as_f64();
        ensure_tilt(s, self.sqrt_shape)?;
        let y = self.point(x.as_f64());
        if !(y > 0.0 && y.is_finite()) {
            return Ok(X::zero());
        }
        Ok(X::constant((-y).exp() * (s * y).exp_m1()))
    }
}
