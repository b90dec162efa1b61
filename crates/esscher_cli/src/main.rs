//! Esscher CLI - command line front end for the option engine
//!
//! # Commands
//!
//! - `esscher price` - Value a European option and report its Greeks
//! - `esscher implied` - Solve for the volatility-scale matching a price
//! - `esscher check` - Verify a family's Greeks against finite differences
//!
//! The variate family comes from `--family` when given, otherwise from the
//! configuration file (`esscher.toml`) or `ESSCHER_VARIATE`.

use std::path::Path;

use clap::{Parser, Subcommand};
use esscher_models::instruments::PayoffType;
use esscher_models::variate::VariateConfig;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use commands::check::CheckParams;
use config::CliConfig;

/// Esscher option engine CLI
#[derive(Parser)]
#[command(name = "esscher")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "esscher.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Value a European option and report its Greeks
    Price {
        /// Forward price
        #[arg(short, long)]
        forward: f64,

        /// Volatility-scale (e.g. σ√T)
        #[arg(short, long)]
        scale: f64,

        /// Strike price
        #[arg(short = 'k', long)]
        strike: f64,

        /// Payoff type (call, put)
        #[arg(short, long, default_value = "call")]
        payoff: PayoffType,

        /// Variate family (normal, exponential, gamma:<shape>)
        #[arg(short = 'm', long)]
        family: Option<VariateConfig>,

        /// Output format (json, table)
        #[arg(short = 'o', long, default_value = "table")]
        format: String,
    },

    /// Solve for the volatility-scale that reproduces a price
    Implied {
        /// Forward price
        #[arg(short, long)]
        forward: f64,

        /// Strike price
        #[arg(short = 'k', long)]
        strike: f64,

        /// Payoff type (call, put)
        #[arg(short, long, default_value = "call")]
        payoff: PayoffType,

        /// Quoted option price
        #[arg(short = 'q', long)]
        price: f64,

        /// Variate family (normal, exponential, gamma:<shape>)
        #[arg(short = 'm', long)]
        family: Option<VariateConfig>,

        /// Output format (json, table)
        #[arg(short = 'o', long, default_value = "table")]
        format: String,
    },

    /// Verify analytic Greeks against finite differences
    Check {
        /// Variate family (normal, exponential, gamma:<shape>)
        #[arg(short = 'm', long)]
        family: Option<VariateConfig>,

        /// Centre of the forward scan
        #[arg(short, long, default_value = "100")]
        forward: f64,

        /// Strike price
        #[arg(short = 'k', long, default_value = "100")]
        strike: f64,

        /// Volatility-scale
        #[arg(long, default_value = "0.1")]
        scale: f64,

        /// Finite-difference spacing
        #[arg(long, default_value = "0.01")]
        dx: f64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load_with_env_and_validate(Path::new(&cli.config))?;

    // Initialise tracing: RUST_LOG wins, then --verbose, then the config file
    let level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }
    debug!(?config, "Loaded configuration");

    match cli.command {
        Commands::Price {
            forward,
            scale,
            strike,
            payoff,
            family,
            format,
        } => commands::price::run(&config, forward, scale, strike, payoff, family, &format),
        Commands::Implied {
            forward,
            strike,
            payoff,
            price,
            family,
            format,
        } => commands::implied::run(&config, forward, strike, payoff, price, family, &format),
        Commands::Check {
            family,
            forward,
            strike,
            scale,
            dx,
        } => commands::check::run(
            &config,
            family,
            CheckParams {
                forward,
                strike,
                scale,
                dx,
            },
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_price() {
        let cli = Cli::try_parse_from([
            "esscher", "price", "-f", "100", "-s", "0.1", "-k", "95", "-p", "put", "-m",
            "gamma:4",
        ])
        .unwrap();

        match cli.command {
            Commands::Price {
                forward,
                payoff,
                family,
                format,
                ..
            } => {
                assert_eq!(forward, 100.0);
                assert_eq!(payoff, PayoffType::Put);
                assert_eq!(family, Some(VariateConfig::Gamma { shape: 4.0 }));
                assert_eq!(format, "table");
            }
            _ => panic!("Expected price command"),
        }
        assert_eq!(cli.config, "esscher.toml");
    }

    #[test]
    fn test_parse_rejects_unknown_family() {
        let result = Cli::try_parse_from([
            "esscher", "implied", "-f", "100", "--strike", "100", "-q", "4", "-m", "levy",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_check_defaults() {
        let cli = Cli::try_parse_from(["esscher", "check", "--verbose"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Check {
                family,
                forward,
                scale,
                dx,
                ..
            } => {
                assert_eq!(family, None);
                assert_eq!(forward, 100.0);
                assert_eq!(scale, 0.1);
                assert_eq!(dx, 0.01);
            }
            _ => panic!("Expected check command"),
        }
    }
}
