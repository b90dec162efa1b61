//! Runtime description of a variate family.
//!
//! [`VariateConfig`] is what configuration files and command lines carry.
//! It deserializes from a tagged table
//!
//! ```toml
//! [variate]
//! family = "gamma"
//! shape = 4.0
//! ```
//!
//! or parses from the short forms `normal`, `exponential` and
//! `gamma:<shape>`, and builds a [`VariateModel`] for any [`Real`] type.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::{Gamma, Normal, VariateModel};
use crate::analytical::AnalyticalError;
use esscher_core::types::Real;

/// Errors from parsing a variate family string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseVariateError {
    /// Family name not recognised.
    #[error("Unknown variate family: {0}. Must be one of: normal, exponential, gamma:<shape>")]
    UnknownFamily(String),

    /// Shape suffix is not a number.
    #[error("Invalid gamma shape: {0}")]
    InvalidShape(String),
}

/// Variate family selection.
///
/// # Examples
/// ```
/// use esscher_models::variate::{Variate, VariateConfig};
///
/// let config: VariateConfig = "gamma:4".parse().unwrap();
/// assert_eq!(config, VariateConfig::Gamma { shape: 4.0 });
///
/// let model = config.build::<f64>().unwrap();
/// assert_eq!(model.name(), "gamma");
/// assert_eq!(model.tilt_limit(), 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "family", rename_all = "lowercase"))]
pub enum VariateConfig {
    /// Standard normal (Black's formula on the forward).
    #[default]
    Normal,

    /// Standardized exponential.
    Exponential,

    /// Standardized gamma with the given shape.
    Gamma {
        /// Shape parameter `α > 0`
        shape: f64,
    },
}

impl VariateConfig {
    /// Builds the configured model.
    ///
    /// # Errors
    ///
    /// `AnalyticalError::InvalidShape` for a non-positive or non-finite gamma shape.
    pub fn build<X: Real>(&self) -> Result<VariateModel<X>, AnalyticalError> {
        let model = match *self {
            VariateConfig::Normal => VariateModel::new(Normal),
            VariateConfig::Exponential => VariateModel::new(Gamma::exponential()),
            VariateConfig::Gamma { shape } => VariateModel::new(Gamma::new(shape)?),
        };
        tracing::debug!(family = %self, "Built variate model");
        Ok(model)
    }

    /// Family name without parameters.
    pub fn family(&self) -> &'static str {
        match self {
            VariateConfig::Normal => "normal",
            VariateConfig::Exponential => "exponential",
            VariateConfig::Gamma { .. } => "gamma",
        }
    }
}

impl FromStr for VariateConfig {
    type Err = ParseVariateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        match lower.split_once(':') {
            None => match lower.as_str() {
                "normal" | "gaussian" => Ok(VariateConfig::Normal),
                "exponential" | "exp" => Ok(VariateConfig::Exponential),
                _ => Err(ParseVariateError::UnknownFamily(s.to_string())),
            },
            Some(("gamma", shape)) => shape
                .trim()
                .parse::<f64>()
                .map(|shape| VariateConfig::Gamma { shape })
                .map_err(|_| ParseVariateError::InvalidShape(shape.to_string())),
            Some(_) => Err(ParseVariateError::UnknownFamily(s.to_string())),
        }
    }
}

impl fmt::Display for VariateConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariateConfig::Gamma { shape } => write!(f, "gamma:{}", shape),
            other => write!(f, "{}", other.family()),
        }
    }
}
