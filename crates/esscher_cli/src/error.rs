//! Error types for the esscher CLI.

use esscher_core::types::PricingError;
use esscher_models::analytical::AnalyticalError;
use thiserror::Error;

use crate::config::ConfigError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pricing or model construction failed
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// Invalid command line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Output serialisation failed
    #[error("Serialisation error: {0}")]
    Serialisation(#[from] serde_json::Error),

    /// Derivative-consistency check exceeded its bound
    #[error("Consistency check failed: {0}")]
    CheckFailed(String),
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

impl From<AnalyticalError> for CliError {
    fn from(err: AnalyticalError) -> Self {
        CliError::Pricing(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CliError::InvalidArgument("format xml".to_string());
        assert_eq!(err.to_string(), "Invalid argument: format xml");
    }

    #[test]
    fn test_from_analytical() {
        let err: CliError = AnalyticalError::InvalidScale { scale: 0.0 }.into();
        assert!(matches!(err, CliError::Pricing(PricingError::InvalidInput(_))));
        assert_eq!(
            err.to_string(),
            "Pricing error: Invalid input: Invalid volatility scale: s = 0"
        );

        let err: CliError = AnalyticalError::TiltOutOfRange {
            tilt: 1.2,
            limit: 1.0,
        }
        .into();
        assert!(matches!(err, CliError::Pricing(PricingError::ModelFailure(_))));

        let err: CliError = AnalyticalError::MoneynessOverflow {
            forward: 100.0,
            scale: 1e200,
            strike: 100.0,
        }
        .into();
        assert!(matches!(
            err,
            CliError::Pricing(PricingError::NumericalInstability(_))
        ));
    }

    #[test]
    fn test_from_config() {
        let err: CliError = ConfigError::Parse("bad".to_string()).into();
        assert!(err.to_string().contains("Parse error: bad"));
    }
}
