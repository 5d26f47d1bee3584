//! # Planner Configuration
//!
//! User-level settings read from a single YAML file. Every field has a
//! default, so a partial file (or no file at all) is valid.
//!
//! ## YAML Format
//!
//! ```yaml
//! currency: COP
//! language: spanish
//! planned_investment: 400000
//! points_per_block: 50
//! points_per_level: 100
//! block_value_usd: 100
//! block_value_cop: 100000
//! chart_granularity: month
//! flow_bar_limit: 24
//! ```

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use shared::{CurrencyCode, Granularity};
use std::fs;
use std::path::Path;

use crate::domain::labels::DisplayLanguage;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Block value for {0} must be a positive number")]
    InvalidBlockValue(&'static str),
    #[error("Points per level must be positive")]
    ZeroPointsPerLevel,
    #[error("Flow bar limit must be positive")]
    ZeroFlowBarLimit,
    #[error("Planned investment must be a non-negative number")]
    InvalidPlannedInvestment,
}

/// Settings shared by every service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub currency: CurrencyCode,
    pub language: DisplayLanguage,
    /// Amount the user intends to put aside each month
    pub planned_investment: f64,
    /// Points earned for each full block invested in a month
    pub points_per_block: u64,
    /// Points needed to move up one level
    pub points_per_level: u64,
    pub block_value_usd: f64,
    pub block_value_cop: f64,
    pub chart_granularity: Granularity,
    /// Number of most recent periods kept in the flow chart
    pub flow_bar_limit: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            currency: CurrencyCode::Cop,
            language: DisplayLanguage::English,
            planned_investment: 0.0,
            points_per_block: 50,
            points_per_level: 100,
            block_value_usd: 100.0,
            block_value_cop: 100_000.0,
            chart_granularity: Granularity::Month,
            flow_bar_limit: 24,
        }
    }
}

impl PlannerConfig {
    /// Invested amount that earns one block of points in the configured currency
    pub fn block_value(&self) -> f64 {
        match self.currency {
            CurrencyCode::Usd => self.block_value_usd,
            CurrencyCode::Cop => self.block_value_cop,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.block_value_usd.is_finite() || self.block_value_usd <= 0.0 {
            return Err(ConfigError::InvalidBlockValue("USD"));
        }
        if !self.block_value_cop.is_finite() || self.block_value_cop <= 0.0 {
            return Err(ConfigError::InvalidBlockValue("COP"));
        }
        if self.points_per_level == 0 {
            return Err(ConfigError::ZeroPointsPerLevel);
        }
        if self.flow_bar_limit == 0 {
            return Err(ConfigError::ZeroFlowBarLimit);
        }
        if !self.planned_investment.is_finite() || self.planned_investment < 0.0 {
            return Err(ConfigError::InvalidPlannedInvestment);
        }
        Ok(())
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: PlannerConfig =
            serde_yaml::from_str(yaml).context("Failed to parse planner config YAML")?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate the config file at `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        info!("Loaded planner config from {}", path.display());
        Ok(config)
    }

    /// Like [`PlannerConfig::load`], but a missing file yields the defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            warn!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }
}
