//! Generic real-number trait for pricing formulas.
//!
//! Every formula in the workspace is written once against [`Real`] and
//! instantiated for `f32` and `f64`. The trait extends [`num_traits::Float`]
//! with the pieces `Float` lacks: the error function, infallible literal
//! conversion, and a lossless widening to `f64` for diagnostics.
//!
//! The error function is always evaluated in double precision with `libm`
//! (the fdlibm algorithms, accurate to within an ulp of `f64`) and rounded
//! once, so single precision results carry no `f32` truncation error.

use std::fmt::{Debug, Display};

use num_traits::{Float, FloatConst};

/// Floating-point type usable by the option engine.
///
/// # Examples
/// ```
/// use esscher_core::types::Real;
///
/// fn standard_normal_cdf<X: Real>(x: X) -> X {
///     X::constant(0.5) * (-x / X::SQRT_2()).erfc()
/// }
///
/// assert!((standard_normal_cdf(1.0_f64) - 0.841_344_746_068_543).abs() < 1e-15);
/// assert!((standard_normal_cdf(1.0_f32) - 0.841_344_7).abs() < 1e-6);
/// ```
pub trait Real: Float + FloatConst + Debug + Display + Send + Sync + 'static {
    /// Converts an `f64` literal, rounding to the nearest representable value.
    fn constant(value: f64) -> Self;

    /// Widens to `f64` (exact for both implementors).
    fn as_f64(self) -> f64;

    /// Error function `erf(x) = 2/√π ∫₀ˣ e^(-t²) dt`.
    fn erf(self) -> Self;

    /// Complementary error function `erfc(x) = 1 - erf(x)`, accurate in the upper tail.
    fn erfc(self) -> Self;
}

impl Real for f64 {
    #[inline]
    fn constant(value: f64) -> Self {
        value
    }

    #[inline]
    fn as_f64(self) -> f64 {
        self
    }

    #[inline]
    fn erf(self) -> Self {
        libm::erf(self)
    }

    #[inline]
    fn erfc(self) -> Self {
        libm::erfc(self)
    }
}

impl Real for f32 {
    #[inline]
    fn constant(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn as_f64(self) -> f64 {
        f64::from(self)
    }

    #[inline]
    fn erf(self) -> Self {
        libm::erf(f64::from(self)) as f32
    }

    #[inline]
    fn erfc(self) -> Self {
        libm::erfc(f64::from(self)) as f32
    }
}
