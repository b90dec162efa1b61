//! Implied command implementation
//!
//! Recovers the volatility-scale that reproduces a quoted option price.

use esscher_core::math::solvers::SolverConfig;
use esscher_models::analytical::OptionModel;
use esscher_models::instruments::{PayoffType, Vanilla};
use esscher_models::variate::{Variate, VariateConfig};
use serde::Serialize;
use tracing::info;

use super::{engine, OutputFormat};
use crate::config::CliConfig;
use crate::Result;

/// Solved scale, as printed by `esscher implied`
#[derive(Debug, Clone, Serialize)]
pub struct ImpliedReport {
    /// Variate family name
    pub family: String,
    /// Call or put
    pub payoff: PayoffType,
    /// Forward price
    pub forward: f64,
    /// Strike price
    pub strike: f64,
    /// Quoted price
    pub price: f64,
    /// Implied volatility-scale
    pub scale: f64,
    /// Model value at the implied scale
    pub repriced: f64,
}

impl ImpliedReport {
    /// Solves for the scale under `model`
    pub fn compute<V: Variate<f64>>(
        model: &OptionModel<V>,
        forward: f64,
        price: f64,
        payoff: &Vanilla<f64>,
        solver: &SolverConfig<f64>,
    ) -> Result<Self> {
        let scale = model.implied_scale(forward, price, payoff, solver)?;
        let repriced = model.value(forward, scale, payoff)?;
        Ok(Self {
            family: model.variate().name().to_string(),
            payoff: payoff.payoff_type,
            forward,
            strike: payoff.strike,
            price,
            scale,
            repriced,
        })
    }

    /// Boxed table rendering
    pub fn to_table(&self) -> String {
        let rows = [
            ("Family", self.family.clone()),
            ("Payoff", self.payoff.to_string()),
            ("Forward", format!("{:.6}", self.forward)),
            ("Strike", format!("{:.6}", self.strike)),
            ("Price", format!("{:.10}", self.price)),
            ("Scale", format!("{:.10}", self.scale)),
            ("Repriced", format!("{:.10}", self.repriced)),
        ];

        let mut out = String::from("┌────────────┬──────────────────────┐\n");
        for (label, value) in rows {
            out.push_str(&format!("│ {:<10} │ {:>20} │\n", label, value));
        }
        out.push_str("└────────────┴──────────────────────┘\n");
        out
    }
}

/// Run the implied command
pub fn run(
    config: &CliConfig,
    forward: f64,
    strike: f64,
    payoff: PayoffType,
    price: f64,
    family: Option<VariateConfig>,
    format: &str,
) -> Result<()> {
    let format = OutputFormat::parse(format)?;

    info!("Solving for implied scale...");
    info!("  Forward: {}", forward);
    info!("  Strike: {} ({})", strike, payoff);
    info!("  Price: {}", price);
    info!(
        "  Solver: tolerance {}, max {} iterations",
        config.solver.tolerance, config.solver.max_iterations
    );

    let model = engine(family, config)?;
    let report = ImpliedReport::compute(
        &model,
        forward,
        price,
        &Vanilla::new(payoff, strike),
        &config.solver,
    )?;

    match format {
        OutputFormat::Table => print!("{}", report.to_table()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    info!("Implied scale: {:.10}", report.scale);
    Ok(())
}
