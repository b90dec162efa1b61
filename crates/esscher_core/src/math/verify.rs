//! Finite-difference verification of analytic derivatives.
//!
//! Analytic sensitivities are validated by differentiating the value
//! function numerically and comparing the two across a scanned domain:
//!
//! ```text
//! discrepancy(x) = f'(x) - (f(x + dx) - f(x - dx)) / (2 dx)
//! ```
//!
//! The centred scheme has truncation error `f'''(x) dx² / 6`, so a correct
//! analytic derivative is expected to stay within a small multiple of `dx²`.
//!
//! ## Usage
//!
//! ```rust
//! use esscher_core::math::verify::derivative_range;
//!
//! let range = derivative_range(f64::sin, f64::cos, 1e-3, 0.0, 3.0, 0.25);
//! assert!(range.max_abs() < 1e-6);
//!
//! // A wrong derivative is caught
//! let range = derivative_range(f64::sin, f64::sin, 1e-3, 0.0, 3.0, 0.25);
//! assert!(range.max_abs() > 0.5);
//! ```

use num_traits::Float;

/// Extremal signed discrepancies observed by [`derivative_range`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivativeRange<T> {
    /// Smallest `f'(x) - finite difference` over the scan.
    pub min: T,
    /// Largest `f'(x) - finite difference` over the scan.
    pub max: T,
}

impl<T: Float> DerivativeRange<T> {
    /// Worst absolute discrepancy.
    #[inline]
    pub fn max_abs(&self) -> T {
        self.min.abs().max(self.max.abs())
    }
}

/// Scans `[lo, hi]` with stride `step` and compares `f_prime` against the
/// centred difference of `f` with spacing `dx`.
///
/// Sample points are `lo + i * step` for `i = 0..=n`, where
/// `n = round((hi - lo) / step)`, so `hi` is included even when the stride
/// does not divide the interval exactly in floating point.
///
/// # Panics
///
/// Panics if `dx <= 0`, `step <= 0` or `hi < lo`.
pub fn derivative_range<T, F, G>(
    f: F,
    f_prime: G,
    dx: T,
    lo: T,
    hi: T,
    step: T,
) -> DerivativeRange<T>
where
    T: Float,
    F: Fn(T) -> T,
    G: Fn(T) -> T,
{
    assert!(dx > T::zero(), "dx must be positive");
    assert!(step > T::zero(), "step must be positive");
    assert!(lo <= hi, "scan interval must satisfy lo <= hi");

    let samples = ((hi - lo) / step).round().to_usize().unwrap_or(0);
    let two_dx = dx + dx;

    let discrepancy = |x: T| f_prime(x) - (f(x + dx) - f(x - dx)) / two_dx;

    let first = discrepancy(lo);
    let mut range = DerivativeRange {
        min: first,
        max: first,
    };

    for i in 1..=samples {
        let x = lo + step * T::from(i).unwrap_or_else(T::nan);
        let d = discrepancy(x);
        range.min = range.min.min(d);
        range.max = range.max.max(d);
    }

    range
}
