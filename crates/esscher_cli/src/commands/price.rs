//! Price command implementation
//!
//! Values one European option and reports its Greeks.

use esscher_models::analytical::{Greeks, OptionModel};
use esscher_models::instruments::{PayoffType, Vanilla};
use esscher_models::variate::{Variate, VariateConfig};
use serde::Serialize;
use tracing::info;

use super::{engine, OutputFormat};
use crate::config::CliConfig;
use crate::Result;

/// Priced option, as printed by `esscher price`
#[derive(Debug, Clone, Serialize)]
pub struct PriceReport {
    /// Variate family name
    pub family: String,
    /// Call or put
    pub payoff: PayoffType,
    /// Forward price
    pub forward: f64,
    /// Volatility-scale
    pub scale: f64,
    /// Strike price
    pub strike: f64,
    /// Value and Greeks
    #[serde(flatten)]
    pub greeks: Greeks<f64>,
}

impl PriceReport {
    /// Prices `payoff` under `model`
    pub fn compute<V: Variate<f64>>(
        model: &OptionModel<V>,
        forward: f64,
        scale: f64,
        payoff: &Vanilla<f64>,
    ) -> Result<Self> {
        let greeks = model.greeks(forward, scale, payoff)?;
        Ok(Self {
            family: model.variate().name().to_string(),
            payoff: payoff.payoff_type,
            forward,
            scale,
            strike: payoff.strike,
            greeks,
        })
    }

    /// Boxed table rendering
    pub fn to_table(&self) -> String {
        let rows = [
            ("Family", self.family.clone()),
            ("Payoff", self.payoff.to_string()),
            ("Forward", format!("{:.6}", self.forward)),
            ("Scale", format!("{:.6}", self.scale)),
            ("Strike", format!("{:.6}", self.strike)),
            ("Moneyness", format!("{:.10}", self.greeks.moneyness)),
            ("Value", format!("{:.10}", self.greeks.value)),
            ("Delta", format!("{:.10}", self.greeks.delta)),
            ("Gamma", format!("{:.10}", self.greeks.gamma)),
            ("Vega", format!("{:.10}", self.greeks.vega)),
        ];

        let mut out = String::new();
        out.push_str("┌────────────┬──────────────────────┐\n");
        for (i, (label, value)) in rows.iter().enumerate() {
            out.push_str(&format!("│ {:<10} │ {:>20} │\n", label, value));
            if i == 4 {
                out.push_str("├────────────┼──────────────────────┤\n");
            }
        }
        out.push_str("└────────────┴──────────────────────┘\n");
        out
    }
}

/// Run the price command
pub fn run(
    config: &CliConfig,
    forward: f64,
    scale: f64,
    strike: f64,
    payoff: PayoffType,
    family: Option<VariateConfig>,
    format: &str,
) -> Result<()> {
    let format = OutputFormat::parse(format)?;

    info!("Starting pricing...");
    info!("  Forward: {}", forward);
    info!("  Scale: {}", scale);
    info!("  Strike: {} ({})", strike, payoff);

    let model = engine(family, config)?;
    let report = PriceReport::compute(&model, forward, scale, &Vanilla::new(payoff, strike))?;

    match format {
        OutputFormat::Table => print!("{}", report.to_table()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    info!("Pricing complete");
    Ok(())
}
