//! Check command implementation
//!
//! Verifies a variate family's analytic Greeks against centred finite
//! differences of its own value function:
//!
//! - value/delta for call and put, forward scanned over ±10%
//! - delta/gamma over the same forwards
//! - value/vega at the given forward, scale scanned over `[s, 2s]`
//!
//! A row passes when its worst discrepancy is below `max(ε, 10 dx²)`.

use std::cell::RefCell;

use esscher_core::math::verify::{derivative_range, DerivativeRange};
use esscher_models::analytical::{AnalyticalError, OptionModel};
use esscher_models::instruments::{Call, Put};
use esscher_models::variate::{Variate, VariateConfig};
use tracing::{info, warn};

use super::engine;
use crate::config::CliConfig;
use crate::{CliError, Result};

/// Scan parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckParams {
    /// Centre of the forward scan
    pub forward: f64,
    /// Strike
    pub strike: f64,
    /// Scale for the forward scans, lower end of the scale scan
    pub scale: f64,
    /// Finite-difference spacing
    pub dx: f64,
}

impl Default for CheckParams {
    fn default() -> Self {
        Self {
            forward: 100.0,
            strike: 100.0,
            scale: 0.1,
            dx: 0.01,
        }
    }
}

impl CheckParams {
    fn validate(&self) -> Result<()> {
        let positive = |x: f64| x.is_finite() && x > 0.0;
        if !(positive(self.forward) && positive(self.strike) && positive(self.scale)) {
            return Err(CliError::InvalidArgument(
                "forward, strike and scale must be positive".to_string(),
            ));
        }
        if !positive(self.dx) || self.dx >= self.scale || self.dx >= 0.9 * self.forward {
            return Err(CliError::InvalidArgument(format!(
                "dx must lie in (0, min(scale, 0.9 forward)), got {}",
                self.dx
            )));
        }
        Ok(())
    }

    /// Acceptance bound for every row
    pub fn bound(&self) -> f64 {
        f64::EPSILON.max(10.0 * self.dx * self.dx)
    }
}

/// One derivative pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckRow {
    /// Pair label
    pub name: &'static str,
    /// Signed discrepancy range
    pub range: DerivativeRange<f64>,
    /// Acceptance bound
    pub bound: f64,
}

impl CheckRow {
    /// Whether the worst discrepancy is within the bound
    pub fn passed(&self) -> bool {
        self.range.max_abs() < self.bound
    }
}

/// Runs `derivative_range` over fallible functions, surfacing the first
/// pricing error after the scan.
fn scan<F, G>(
    f: F,
    f_prime: G,
    dx: f64,
    lo: f64,
    hi: f64,
    step: f64,
) -> Result<DerivativeRange<f64>>
where
    F: Fn(f64) -> std::result::Result<f64, AnalyticalError>,
    G: Fn(f64) -> std::result::Result<f64, AnalyticalError>,
{
    let failure = RefCell::new(None);
    let capture = |result: std::result::Result<f64, AnalyticalError>| {
        result.unwrap_or_else(|e| {
            failure.borrow_mut().get_or_insert(e);
            f64::NAN
        })
    };

    let range = derivative_range(
        |x| capture(f(x)),
        |x| capture(f_prime(x)),
        dx,
        lo,
        hi,
        step,
    );

    match failure.into_inner() {
        Some(e) => Err(e.into()),
        None => Ok(range),
    }
}

/// Scans every derivative pair of `model`
pub fn scan_all<V: Variate<f64>>(
    model: &OptionModel<V>,
    params: &CheckParams,
) -> Result<Vec<CheckRow>> {
    params.validate()?;

    let CheckParams {
        forward,
        strike,
        scale,
        dx,
    } = *params;
    let bound = params.bound();
    let call = Call::new(strike);
    let put = Put::new(strike);
    let (lo, hi, step) = (0.9 * forward, 1.1 * forward, forward / 100.0);

    let row = |name, range| CheckRow { name, range, bound };

    Ok(vec![
        row(
            "call value/delta",
            scan(
                |x| model.value(x, scale, &call),
                |x| model.delta(x, scale, &call),
                dx,
                lo,
                hi,
                step,
            )?,
        ),
        row(
            "put value/delta",
            scan(
                |x| model.value(x, scale, &put),
                |x| model.delta(x, scale, &put),
                dx,
                lo,
                hi,
                step,
            )?,
        ),
        row(
            "delta/gamma",
            scan(
                |x| model.delta(x, scale, &call),
                |x| model.gamma(x, scale, strike),
                dx,
                lo,
                hi,
                step,
            )?,
        ),
        row(
            "value/vega",
            scan(
                |x| model.value(forward, x, &call),
                |x| model.vega(forward, x, strike),
                dx,
                scale,
                2.0 * scale,
                scale / 10.0,
            )?,
        ),
    ])
}

/// Boxed table rendering
pub fn to_table(rows: &[CheckRow]) -> String {
    let mut out = String::new();
    out.push_str("┌──────────────────┬──────────────┬──────────────┬──────────┬────────┐\n");
    out.push_str("│ Pair             │ Min          │ Max          │ Bound    │ Status │\n");
    out.push_str("├──────────────────┼──────────────┼──────────────┼──────────┼────────┤\n");
    for row in rows {
        out.push_str(&format!(
            "│ {:<16} │ {:>12.3e} │ {:>12.3e} │ {:>8.1e} │ {:<6} │\n",
            row.name,
            row.range.min,
            row.range.max,
            row.bound,
            if row.passed() { "ok" } else { "FAIL" }
        ));
    }
    out.push_str("└──────────────────┴──────────────┴──────────────┴──────────┴────────┘\n");
    out
}

/// Run the check command
pub fn run(config: &CliConfig, family: Option<VariateConfig>, params: CheckParams) -> Result<()> {
    info!("Checking Greeks against finite differences...");
    info!(
        "  Forward: {}, strike: {}, scale: {}, dx: {}",
        params.forward, params.strike, params.scale, params.dx
    );

    let model = engine(family, config)?;
    let rows = scan_all(&model, &params)?;
    print!("{}", to_table(&rows));

    let failed: Vec<&str> = rows
        .iter()
        .filter(|row| !row.passed())
        .map(|row| row.name)
        .collect();

    if failed.is_empty() {
        info!("All {} pairs within bound", rows.len());
        Ok(())
    } else {
        warn!("{} of {} pairs exceed the bound", failed.len(), rows.len());
        Err(CliError::CheckFailed(failed.join(", ")))
    }
}
