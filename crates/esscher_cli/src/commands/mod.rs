//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod check;
pub mod implied;
pub mod price;

use esscher_models::analytical::OptionModel;
use esscher_models::variate::{VariateConfig, VariateModel};
use tracing::info;

use crate::config::CliConfig;
use crate::{CliError, Result};

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Boxed table on stdout
    Table,
    /// Pretty-printed JSON on stdout
    Json,
}

impl OutputFormat {
    /// Parse a `--format` argument
    pub fn parse(format: &str) -> Result<Self> {
        match format {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(CliError::InvalidArgument(format!(
                "Unknown format: {}. Supported: json, table",
                other
            ))),
        }
    }
}

/// Builds the engine for the command line family, falling back to the
/// configured one.
pub fn engine(
    family: Option<VariateConfig>,
    config: &CliConfig,
) -> Result<OptionModel<VariateModel<f64>>> {
    let family = family.unwrap_or(config.variate);
    info!("  Variate: {}", family);
    Ok(OptionModel::new(family.build()?))
}
