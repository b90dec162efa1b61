//! CLI configuration management.
//!
//! Loads `esscher.toml` (optional) and applies environment overrides:
//!
//! ```toml
//! log_level = "info"
//!
//! [variate]
//! family = "gamma"
//! shape = 4.0
//!
//! [solver]
//! tolerance = 1e-10
//! max_iterations = 100
//! ```
//!
//! | Variable | Overrides |
//! |----------|-----------|
//! | `ESSCHER_LOG_LEVEL` | `log_level` |
//! | `ESSCHER_VARIATE` | `variate` (`normal`, `exponential`, `gamma:<shape>`) |

use std::path::Path;

use esscher_core::math::solvers::SolverConfig;
use esscher_models::variate::VariateConfig;
use serde::Deserialize;
use thiserror::Error;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration error type
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(String),

    /// Parse error in config file or override
    #[error("Parse error: {0}")]
    Parse(String),

    /// Validation errors
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// CLI configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct CliConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Default variate family
    pub variate: VariateConfig,

    /// Implied scale solver settings
    pub solver: SolverConfig<f64>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            variate: VariateConfig::default(),
            solver: SolverConfig::default(),
        }
    }
}

impl CliConfig {
    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Load from `path` if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply `ESSCHER_LOG_LEVEL` and `ESSCHER_VARIATE`
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides(
            std::env::var("ESSCHER_LOG_LEVEL").ok(),
            std::env::var("ESSCHER_VARIATE").ok(),
        )
    }

    /// Apply explicit overrides (same semantics as the environment variables)
    pub fn with_overrides(
        mut self,
        log_level: Option<String>,
        variate: Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(level) = log_level {
            self.log_level = level;
        }
        if let Some(variate) = variate {
            self.variate = variate
                .parse()
                .map_err(|e: esscher_models::variate::config::ParseVariateError| {
                    ConfigError::Parse(e.to_string())
                })?;
        }
        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, LOG_LEVELS
            ));
        }

        if let Err(e) = self.variate.build::<f64>() {
            errors.push(format!("Invalid variate '{}': {}", self.variate, e));
        }

        if !(self.solver.tolerance.is_finite() && self.solver.tolerance > 0.0) {
            errors.push(format!(
                "solver.tolerance must be positive, got {}",
                self.solver.tolerance
            ));
        }
        if self.solver.max_iterations == 0 {
            errors.push("solver.max_iterations must be greater than 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load, apply environment overrides and validate
    pub fn load_with_env_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load_or_default(path)?.with_env_override()?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.variate, VariateConfig::Normal);
        assert_eq!(config.solver.max_iterations, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_full() {
        let config = CliConfig::from_toml(
            r#"
            log_level = "debug"

            [variate]
            family = "gamma"
            shape = 4.0

            [solver]
            tolerance = 1e-12
            max_iterations = 50
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.variate, VariateConfig::Gamma { shape: 4.0 });
        assert_eq!(config.solver.tolerance, 1e-12);
        assert_eq!(config.solver.max_iterations, 50);
    }

    #[test]
    fn test_from_toml_partial_uses_defaults() {
        let config = CliConfig::from_toml("[variate]\nfamily = \"exponential\"\n").unwrap();
        assert_eq!(config.variate, VariateConfig::Exponential);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.solver, SolverConfig::default());
    }

    #[test]
    fn test_from_toml_rejects_unknown_family() {
        let result = CliConfig::from_toml("[variate]\nfamily = \"levy\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = CliConfig::load_or_default(Path::new("does/not/exist/esscher.toml")).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = CliConfig::default()
            .with_overrides(Some("warn".to_string()), Some("gamma:2".to_string()))
            .unwrap();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.variate, VariateConfig::Gamma { shape: 2.0 });

        let result = CliConfig::default().with_overrides(None, Some("cauchy".to_string()));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validation_collects_errors() {
        let mut config = CliConfig::default();
        config.log_level = "loud".to_string();
        config.variate = VariateConfig::Gamma { shape: -1.0 };
        config.solver.max_iterations = 0;

        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 3);
                assert!(errors[0].contains("log_level"));
                assert!(errors[1].contains("gamma:-1"));
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }
}
