//! Distribution-agnostic European option engine.
//!
//! Prices a European payoff on a forward `f` whose terminal value is
//! `F_T = f · exp(s X - κ(s))`, with `X` a standardized [`Variate`] and `s`
//! the volatility-scale. The put is exercised exactly when `X ≤ z`, with
//!
//! ```text
//! z = (ln(k/f) + κ(s)) / s
//! ```
//!
//! and, since multiplying by `exp(sX - κ(s))` is the Esscher tilt,
//!
//! ```text
//! put  = k Φ(z, 0) - f Φ(z, s)
//! call = f (1 - Φ(z, s)) - k (1 - Φ(z, 0))
//! ```
//!
//! ## Greeks
//!
//! On the boundary `f φ(z, s) = k φ(z, 0)`, so every term produced by
//! differentiating `z` cancels:
//!
//! | Greek | Formula |
//! |-------|---------|
//! | delta | `-Φ(z, s)` (put), `1 - Φ(z, s)` (call) |
//! | gamma | `φ(z, s) / (f s)` |
//! | vega  | `-f ∂Φ/∂s (z, s)` |
//!
//! ## Numerical evaluation
//!
//! The out-of-the-money side is computed from [`Variate::tilt_mass`]
//! (`Φ(z, 0) - Φ(z, s)`), which families evaluate without cancellation:
//!
//! ```text
//! put  = k · tilt_mass + (k - f) Φ(z, s)            (f ≥ k)
//! call = k · tilt_mass - (k - f) (1 - Φ(z, s))      (f < k)
//! ```
//!
//! The in-the-money side is the out-of-the-money value plus intrinsic, so
//! put-call parity holds to rounding and exactly at the money.

use esscher_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
use esscher_core::types::Real;

use super::error::AnalyticalError;
use crate::instruments::{Payoff, PayoffType};
use crate::variate::Variate;

/// Value and first-order Greeks of one option.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Greeks<X> {
    /// Standardized exercise boundary `z`
    pub moneyness: X,
    /// Fair value
    pub value: X,
    /// ∂value/∂f
    pub delta: X,
    /// ∂²value/∂f²
    pub gamma: X,
    /// ∂value/∂s
    pub vega: X,
}

/// European option engine over a variate model.
///
/// Holds exactly one model, by value or by reference (`&V` is itself a
/// [`Variate`]). Market inputs are passed per call and never stored. The
/// numeric type is chosen per call, so an engine over [`Normal`] prices in
/// both `f32` and `f64`.
///
/// # Examples
/// ```
/// use esscher_models::analytical::OptionModel;
/// use esscher_models::instruments::{Call, Put};
/// use esscher_models::variate::Normal;
///
/// let model = OptionModel::new(Normal);
/// let put = model.value(100.0_f64, 0.1, &Put::new(100.0)).unwrap();
/// let call = model.value(100.0_f64, 0.1, &Call::new(100.0)).unwrap();
///
/// assert!((put - 3.987_761_167_674_492).abs() < 1e-14);
/// assert_eq!(call, put);
/// ```
///
/// [`Normal`]: crate::variate::Normal
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OptionModel<V> {
    variate: V,
}

impl<V> OptionModel<V> {
    /// Creates an engine over `variate`.
    pub fn new(variate: V) -> Self {
        Self { variate }
    }

    /// The held variate model.
    #[inline]
    pub fn variate(&self) -> &V {
        &self.variate
    }

    /// Consumes the engine, returning the variate model.
    pub fn into_variate(self) -> V {
        self.variate
    }

    /// Standardized moneyness `z = (ln(k/f) + κ(s)) / s`.
    ///
    /// This is the exercise boundary of the put in `X`, not Black's `d₁`.
    /// For the normal model `z = -d₂ = s - d₁` with
    /// `d₁ = (ln(f/k) + s²/2) / s`, so `z` decreases as the forward rises.
    ///
    /// # Errors
    ///
    /// - `InvalidForward`, `InvalidScale`, `InvalidStrike` for non-positive or
    ///   non-finite inputs
    /// - `TiltOutOfRange` when `s` is beyond the model's tilt limit
    /// - `MoneynessOverflow` when `κ(s)` or `z` is not finite
    ///
    /// # Examples
    /// ```
    /// use esscher_models::analytical::OptionModel;
    /// use esscher_models::variate::Normal;
    ///
    /// let z = OptionModel::new(Normal).moneyness(100.0_f64, 0.1, 100.0).unwrap();
    /// assert!((z - 0.05).abs() < f64::EPSILON);
    /// ```
    pub fn moneyness<X: Real>(&self, f: X, s: X, k: X) -> Result<X, AnalyticalError>
    where
        V: Variate<X>,
    {
        validate(f, s, k)?;
        let kappa = self.variate.cumulant(s)?;
        let z = ((k / f).ln() + kappa) / s;
        if !(kappa.is_finite() && z.is_finite()) {
            return Err(AnalyticalError::MoneynessOverflow {
                forward: f.as_f64(),
                scale: s.as_f64(),
                strike: k.as_f64(),
            });
        }
        Ok(z)
    }

    /// Fair value of `payoff` on forward `f` at volatility-scale `s`.
    ///
    /// Finite and non-negative; converges to intrinsic as `s → 0⁺`.
    pub fn value<X, P>(&self, f: X, s: X, payoff: &P) -> Result<X, AnalyticalError>
    where
        X: Real,
        V: Variate<X>,
        P: Payoff<X> + ?Sized,
    {
        let k = payoff.strike();
        let z = self.moneyness(f, s, k)?;
        self.value_at(z, f, s, k, payoff.payoff_type())
    }

    /// ∂value/∂f: `1 - Φ(z, s)` for a call, `-Φ(z, s)` for a put.
    pub fn delta<X, P>(&self, f: X, s: X, payoff: &P) -> Result<X, AnalyticalError>
    where
        X: Real,
        V: Variate<X>,
        P: Payoff<X> + ?Sized,
    {
        let k = payoff.strike();
        let z = self.moneyness(f, s, k)?;
        self.delta_at(z, s, payoff.payoff_type())
    }

    /// ∂²value/∂f² = `φ(z, s) / (f s)`; identical for calls and puts.
    pub fn gamma<X: Real>(&self, f: X, s: X, k: X) -> Result<X, AnalyticalError>
    where
        V: Variate<X>,
    {
        let z = self.moneyness(f, s, k)?;
        self.gamma_at(z, f, s)
    }

    /// ∂value/∂s = `-f ∂Φ/∂s (z, s)`; identical for calls and puts.
    pub fn vega<X: Real>(&self, f: X, s: X, k: X) -> Result<X, AnalyticalError>
    where
        V: Variate<X>,
    {
        let z = self.moneyness(f, s, k)?;
        self.vega_at(z, f, s)
    }

    /// Value and Greeks sharing one moneyness evaluation.
    ///
    /// # Examples
    /// ```
    /// use esscher_models::analytical::OptionModel;
    /// use esscher_models::instruments::Call;
    /// use esscher_models::variate::Normal;
    ///
    /// let model = OptionModel::new(Normal);
    /// let g = model.greeks(100.0_f64, 0.2, &Call::new(100.0)).unwrap();
    /// assert_eq!(g.value, model.value(100.0, 0.2, &Call::new(100.0)).unwrap());
    /// assert!(g.delta > 0.5 && g.gamma > 0.0 && g.vega > 0.0);
    /// ```
    pub fn greeks<X, P>(&self, f: X, s: X, payoff: &P) -> Result<Greeks<X>, AnalyticalError>
    where
        X: Real,
        V: Variate<X>,
        P: Payoff<X> + ?Sized,
    {
        let k = payoff.strike();
        let payoff_type = payoff.payoff_type();
        let z = self.moneyness(f, s, k)?;
        Ok(Greeks {
            moneyness: z,
            value: self.value_at(z, f, s, k, payoff_type)?,
            delta: self.delta_at(z, s, payoff_type)?,
            gamma: self.gamma_at(z, f, s)?,
            vega: self.vega_at(z, f, s)?,
        })
    }

    /// Volatility-scale at which the model value equals `price`.
    ///
    /// Newton-Raphson on `value(s) - price` with analytic vega, confined to
    /// `(0, tilt_limit)`. The search starts from the larger of the
    /// inflection point `√(2 |ln(k/f)|)` and the at-the-money estimate
    /// `√(2π) · time value / f`.
    ///
    /// # Errors
    ///
    /// - `InvalidForward`, `InvalidStrike` for invalid market inputs
    /// - `InvalidPrice` unless `intrinsic < price < upper`, where `upper` is
    ///   `f` for a call and `k` for a put
    /// - `Solver` when the iteration fails to converge
    ///
    /// # Examples
    /// ```
    /// use esscher_core::math::solvers::SolverConfig;
    /// use esscher_models::analytical::OptionModel;
    /// use esscher_models::instruments::Put;
    /// use esscher_models::variate::Normal;
    ///
    /// let model = OptionModel::new(Normal);
    /// let put = Put::new(100.0_f64);
    /// let price = model.value(100.0, 0.25, &put).unwrap();
    /// let s = model.implied_scale(100.0, price, &put, &SolverConfig::default()).unwrap();
    /// assert!((s - 0.25).abs() < 1e-10);
    /// ```
    pub fn implied_scale<X, P>(
        &self,
        f: X,
        price: X,
        payoff: &P,
        config: &SolverConfig<X>,
    ) -> Result<X, AnalyticalError>
    where
        X: Real,
        V: Variate<X>,
        P: Payoff<X> + ?Sized,
    {
        let k = payoff.strike();
        validate_market(f, k)?;

        let payoff_type = payoff.payoff_type();
        let lower = payoff.intrinsic(f);
        let upper = match payoff_type {
            PayoffType::Call => f,
            PayoffType::Put => k,
        };
        if !(price.is_finite() && price > lower && price < upper) {
            return Err(AnalyticalError::InvalidPrice {
                price: price.as_f64(),
                lower: lower.as_f64(),
                upper: upper.as_f64(),
            });
        }

        let limit = self.variate.tilt_limit();
        let two = X::constant(2.0);
        let inflection = (two * (k / f).ln().abs()).sqrt();
        let at_the_money = (two * X::PI()).sqrt() * (price - lower) / f;
        let mut x0 = inflection.max(at_the_money);
        if !(x0 > X::zero()) {
            x0 = X::one();
        }
        if x0 >= limit {
            x0 = limit / two;
        }

        tracing::debug!(
            family = self.variate.name(),
            forward = %f,
            strike = %k,
            price = %price,
            payoff = %payoff_type,
            initial = %x0,
            "Solving for implied scale"
        );

        let solver = NewtonRaphsonSolver::new(*config);
        let scale = solver.find_root_bounded(
            |s: X| -> Result<X, AnalyticalError> {
                let z = self.moneyness(f, s, k)?;
                Ok(self.value_at(z, f, s, k, payoff_type)? - price)
            },
            |s: X| self.vega(f, s, k),
            x0,
            X::zero(),
            limit,
        )?;

        tracing::debug!(scale = %scale, "Implied scale converged");
        Ok(scale)
    }

    fn value_at<X: Real>(
        &self,
        z: X,
        f: X,
        s: X,
        k: X,
        payoff_type: PayoffType,
    ) -> Result<X, AnalyticalError>
    where
        V: Variate<X>,
    {
        let mass = self.variate.tilt_mass(z, s)?;
        let shifted = self.variate.cdf(z, s)?;

        // Out-of-the-money side first, floored against rounding
        let (otm_type, otm) = if f >= k {
            (PayoffType::Put, k * mass + (k - f) * shifted)
        } else {
            (PayoffType::Call, k * mass - (k - f) * (X::one() - shifted))
        };
        let otm = otm.max(X::zero());

        if payoff_type == otm_type {
            Ok(otm)
        } else {
            Ok(otm + payoff_type.sign::<X>() * (f - k))
        }
    }

    fn delta_at<X: Real>(&self, z: X, s: X, payoff_type: PayoffType) -> Result<X, AnalyticalError>
    where
        V: Variate<X>,
    {
        let shifted = self.variate.cdf(z, s)?;
        Ok(match payoff_type {
            PayoffType::Call => X::one() - shifted,
            PayoffType::Put => -shifted,
        })
    }

    fn gamma_at<X: Real>(&self, z: X, f: X, s: X) -> Result<X, AnalyticalError>
    where
        V: Variate<X>,
    {
        Ok(self.variate.pdf(z, s)? / (f * s))
    }

    fn vega_at<X: Real>(&self, z: X, f: X, s: X) -> Result<X, AnalyticalError>
    where
        V: Variate<X>,
    {
        Ok(-f * self.variate.tilt_derivative(z, s)?)
    }
}

#[inline]
fn validate_market<X: Real>(f: X, k: X) -> Result<(), AnalyticalError> {
    if !(f.is_finite() && f > X::zero()) {
        return Err(AnalyticalError::InvalidForward { forward: f.as_f64() });
    }
    if !(k.is_finite() && k > X::zero()) {
        return Err(AnalyticalError::InvalidStrike { strike: k.as_f64() });
    }
    Ok(())
}

#[inline]
fn validate<X: Real>(f: X, s: X, k: X) -> Result<(), AnalyticalError> {
    validate_market(f, k)?;
    if !(s.is_finite() && s > X::zero()) {
        return Err(AnalyticalError::InvalidScale { scale: s.as_f64() });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::{Call, Put, Vanilla};
    use crate::variate::{Gamma, Normal};
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    /// Black's formula on the forward, independent of the engine.
    fn black_call(f: f64, s: f64, k: f64) -> f64 {
        let n = |x: f64| 0.5 * Real::erfc(-x / std::f64::consts::SQRT_2);
        let d1 = (f / k).ln() / s + 0.5 * s;
        f * n(d1) - k * n(d1 - s)
    }

    // ========================================================================
    // Moneyness and value
    // ========================================================================

    #[test]
    fn test_moneyness_at_the_money() {
        let model = OptionModel::new(Normal);
        let z: f64 = model.moneyness(100.0, 0.1, 100.0).unwrap();
        assert_relative_eq!(z, 0.05, epsilon = f64::EPSILON);
    }

    #[test]
    fn test_moneyness_sign() {
        // Higher strike: put exercised more often, boundary moves up
        let model = OptionModel::new(Normal);
        let low: f64 = model.moneyness(100.0, 0.2, 90.0).unwrap();
        let high: f64 = model.moneyness(100.0, 0.2, 110.0).unwrap();
        assert!(low < 0.1 && 0.1 < high);
    }

    #[test]
    fn test_moneyness_is_minus_d2_for_normal() {
        let model = OptionModel::new(Normal);
        let (f, s, k) = (110.0_f64, 0.2, 100.0);
        let d1 = ((f / k).ln() + 0.5 * s * s) / s;
        let z = model.moneyness(f, s, k).unwrap();
        assert_relative_eq!(z, s - d1, epsilon = 1e-14);
        assert!(z < 0.0 && d1 > 0.0);
    }

    #[test]
    fn test_value_matches_black() {
        let model = OptionModel::new(Normal);
        for (f, s, k) in [(100.0, 0.2, 100.0), (100.0, 0.3, 120.0), (100.0, 0.15, 80.0)] {
            let call = model.value(f, s, &Call::new(k)).unwrap();
            assert_relative_eq!(call, black_call(f, s, k), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_parity_exact_at_the_money() {
        let model = OptionModel::new(Normal);
        let call = model.value(100.0_f64, 0.1, &Call::new(100.0)).unwrap();
        let put = model.value(100.0_f64, 0.1, &Put::new(100.0)).unwrap();
        assert_eq!(call, put);
    }

    #[test]
    fn test_runtime_payoff_matches_static() {
        let model = OptionModel::new(Gamma::new(4.0).unwrap());
        let stat = model.value(95.0_f64, 0.2, &Put::new(100.0)).unwrap();
        let dynamic = model
            .value(95.0_f64, 0.2, &Vanilla::new(PayoffType::Put, 100.0))
            .unwrap();
        assert_eq!(stat, dynamic);
    }

    #[test]
    fn test_value_converges_to_intrinsic() {
        let model = OptionModel::new(Normal);
        let s = 1e-8_f64;
        assert_relative_eq!(model.value(90.0, s, &Put::new(100.0)).unwrap(), 10.0, epsilon = 1e-12);
        assert_eq!(model.value(90.0, s, &Call::new(100.0)).unwrap(), 0.0);
        assert!(model.value(100.0, s, &Call::new(100.0)).unwrap() < 1e-6);
    }

    // ========================================================================
    // Greeks
    // ========================================================================

    #[test]
    fn test_greeks_match_individual_methods() {
        let model = OptionModel::new(Normal);
        let put = Put::new(105.0);
        let g = model.greeks(100.0_f64, 0.25, &put).unwrap();

        assert_eq!(g.moneyness, model.moneyness(100.0, 0.25, 105.0).unwrap());
        assert_eq!(g.value, model.value(100.0, 0.25, &put).unwrap());
        assert_eq!(g.delta, model.delta(100.0, 0.25, &put).unwrap());
        assert_eq!(g.gamma, model.gamma(100.0, 0.25, 105.0).unwrap());
        assert_eq!(g.vega, model.vega(100.0, 0.25, 105.0).unwrap());
    }

    #[test]
    fn test_call_put_delta_differ_by_one() {
        let model = OptionModel::new(Gamma::exponential());
        let call: f64 = model.delta(97.0, 0.3, &Call::new(100.0)).unwrap();
        let put: f64 = model.delta(97.0, 0.3, &Put::new(100.0)).unwrap();
        assert_relative_eq!(call - put, 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_black_vega_at_the_money() {
        // f n(s/2) at the money
        let model = OptionModel::new(Normal);
        let vega: f64 = model.vega(100.0, 0.2, 100.0).unwrap();
        let expected = 100.0 * (-0.005_f64).exp() / (2.0 * std::f64::consts::PI).sqrt();
        assert_relative_eq!(vega, expected, epsilon = 1e-12);
    }

    // ========================================================================
    // Domain errors
    // ========================================================================

    #[test]
    fn test_invalid_inputs() {
        let model = OptionModel::new(Normal);
        assert!(matches!(
            model.value(0.0_f64, 0.1, &Call::new(100.0)),
            Err(AnalyticalError::InvalidForward { .. })
        ));
        assert!(matches!(
            model.value(100.0_f64, 0.1, &Call::new(-5.0)),
            Err(AnalyticalError::InvalidStrike { .. })
        ));
        assert!(matches!(
            model.gamma(100.0_f64, 0.0, 100.0),
            Err(AnalyticalError::InvalidScale { .. })
        ));
        assert!(matches!(
            model.vega(100.0_f64, f64::NAN, 100.0),
            Err(AnalyticalError::InvalidScale { .. })
        ));
        assert!(matches!(
            model.delta(f64::INFINITY, 0.1, &Put::new(100.0)),
            Err(AnalyticalError::InvalidForward { .. })
        ));
    }

    #[test]
    fn test_scale_beyond_tilt_limit() {
        let model = OptionModel::new(Gamma::new(4.0).unwrap());
        assert!(matches!(
            model.value(100.0_f64, 2.5, &Call::new(100.0)),
            Err(AnalyticalError::TiltOutOfRange { .. })
        ));
    }

    #[test]
    fn test_cumulant_overflow_is_an_error() {
        let model = OptionModel::new(Normal);
        let overflow = AnalyticalError::MoneynessOverflow {
            forward: 100.0,
            scale: 1e200,
            strike: 100.0,
        };

        // κ(1e200) = inf in f64
        assert_eq!(model.moneyness(100.0_f64, 1e200, 100.0), Err(overflow.clone()));
        assert_eq!(model.value(100.0_f64, 1e200, &Put::new(100.0)), Err(overflow.clone()));
        assert_eq!(model.value(100.0_f64, 1e200, &Call::new(100.0)), Err(overflow.clone()));
        assert_eq!(model.greeks(100.0_f64, 1e200, &Call::new(100.0)), Err(overflow));

        // κ(1e20) = inf in f32
        assert!(matches!(
            model.value(100.0_f32, 1e20, &Put::new(100.0)),
            Err(AnalyticalError::MoneynessOverflow { .. })
        ));

        // A large but finite cumulant still prices at the strike bound
        let put = model.value(100.0_f64, 1e100, &Put::new(100.0)).unwrap();
        assert_relative_eq!(put, 100.0, epsilon = 1e-12);
    }

    // ========================================================================
    // Implied scale
    // ========================================================================

    #[test]
    fn test_implied_scale_rejects_out_of_band_prices() {
        let model = OptionModel::new(Normal);
        let config = SolverConfig::default();
        let call = Call::new(90.0_f64);

        // Below intrinsic (10)
        match model.implied_scale(100.0, 9.5, &call, &config) {
            Err(AnalyticalError::InvalidPrice { lower, upper, .. }) => {
                assert_eq!((lower, upper), (10.0, 100.0));
            }
            other => panic!("Expected InvalidPrice, got {:?}", other),
        }
        // At or above the forward
        assert!(model.implied_scale(100.0, 100.0, &call, &config).is_err());
        // Put bounded by strike
        assert!(model
            .implied_scale(100.0, 95.0, &Put::new(90.0), &config)
            .is_err());
        assert!(model
            .implied_scale(100.0, f64::NAN, &Put::new(90.0), &config)
            .is_err());
    }

    #[test]
    fn test_implied_scale_solver_failure() {
        let model = OptionModel::new(Normal);
        let config = SolverConfig::new(1e-300, 1);
        let put = Put::new(110.0_f64);
        let price = model.value(100.0, 0.3, &put).unwrap();
        assert!(matches!(
            model.implied_scale(100.0, price, &put, &config),
            Err(AnalyticalError::Solver(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_parity(f in 50.0_f64..150.0, s in 0.01_f64..1.0, k in 50.0_f64..150.0) {
            let model = OptionModel::new(Normal);
            let call = model.value(f, s, &Call::new(k)).unwrap();
            let put = model.value(f, s, &Put::new(k)).unwrap();
            prop_assert!((call - put - (f - k)).abs() <= 4.0 * f64::EPSILON * f.max(k));
        }

        #[test]
        fn prop_bounds(f in 50.0_f64..150.0, s in 0.01_f64..1.5, k in 50.0_f64..150.0) {
            let model = OptionModel::new(Gamma::new(4.0).unwrap());
            let call = Call::new(k);
            let put = Put::new(k);
            let g = model.greeks(f, s, &call).unwrap();

            prop_assert!(g.value >= call.intrinsic(f));
            prop_assert!(g.value <= f);
            prop_assert!(model.value(f, s, &put).unwrap() >= 0.0);
            prop_assert!((0.0..=1.0).contains(&g.delta));
            prop_assert!((-1.0..=0.0).contains(&model.delta(f, s, &put).unwrap()));
            prop_assert!(g.gamma >= 0.0);
            prop_assert!(g.vega >= 0.0);
        }

        #[test]
        fn prop_implied_round_trip(f in 80.0_f64..120.0, s in 0.05_f64..0.8, k in 80.0_f64..120.0) {
            let model = OptionModel::new(Normal);
            let put = Put::new(k);
            let price = model.value(f, s, &put).unwrap();
            // Skip prices too close to intrinsic to pin down s
            prop_assume!(price - put.intrinsic(f) > 1e-4);
            let implied = model.implied_scale(f, price, &put, &SolverConfig::default()).unwrap();
            prop_assert!((implied - s).abs() < 1e-7);
        }
    }
}
