//! Type-erased variate model for runtime family selection.

use std::fmt;
use std::sync::Arc;

use super::Variate;
use crate::analytical::AnalyticalError;
use esscher_core::types::Real;

/// Shareable variate model whose family is chosen at runtime.
///
/// Wraps any [`Variate`] behind an `Arc`, so cloning is cheap and the
/// model outlives every engine built on it. All contract methods, including
/// a family's own `tilt_mass`, are forwarded unchanged.
///
/// # Examples
/// ```
/// use esscher_models::variate::{Gamma, Normal, Variate, VariateModel};
///
/// let models: Vec<VariateModel<f64>> = vec![
///     VariateModel::new(Normal),
///     VariateModel::new(Gamma::exponential()),
/// ];
/// for m in &models {
///     assert!(m.cdf(0.0, 0.0).unwrap() > 0.4);
/// }
/// assert_eq!(models[1].name(), "exponential");
/// ```
#[derive(Clone)]
pub struct VariateModel<X: Real> {
    inner: Arc<dyn Variate<X> + Send + Sync>,
}

impl<X: Real> VariateModel<X> {
    /// Wraps a concrete model.
    pub fn new<V>(model: V) -> Self
    where
        V: Variate<X> + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(model),
        }
    }
}

impl<X: Real> fmt::Debug for VariateModel<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariateModel")
            .field("family", &self.inner.name())
            .field("tilt_limit", &self.inner.tilt_limit())
            .finish()
    }
}

impl<X: Real> Variate<X> for VariateModel<X> {
    #[inline]
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    #[inline]
    fn tilt_limit(&self) -> X {
        self.inner.tilt_limit()
    }

    #[inline]
    fn cumulant(&self, s: X) -> Result<X, AnalyticalError> {
        self.inner.cumulant(s)
    }

    #[inline]
    fn cdf(&self, x: X, s: X) -> Result<X, AnalyticalError> {
        self.inner.cdf(x, s)
    }

    #[inline]
    fn pdf(&self, x: X, s: X) -> Result<X, AnalyticalError> {
        self.inner.pdf(x, s)
    }

    #[inline]
    fn tilt_derivative(&self, x: X, s: X) -> Result<X, AnalyticalError> {
        self.inner.tilt_derivative(x, s)
    }

    #[inline]
    fn tilt_mass(&self, x: X, s: X) -> Result<X, AnalyticalError> {
        self.inner.tilt_mass(x, s)
    }
}
