//! Simulation configuration.

use crate::cost::CommissionModel;
use crate::error::SetupError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// All knobs of a simulation run. Serializable so the CLI can read it from
/// TOML; every field has a default so partial configs work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Inclusive lower bound on dates used; earlier bars are dropped at setup.
    pub start_date: Option<NaiveDate>,
    /// Momentum window in trading days (12 business months of ~20 days).
    pub lookback_period: usize,
    /// Number of assets held per period.
    pub top_quintile: usize,
    /// Revealed bars an asset needs before it is eligible for ranking.
    pub min_history_bars: usize,
    /// Starting cash.
    pub initial_cash: f64,
    /// Commission charged per executed order.
    pub commission: CommissionModel,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            start_date: None,
            lookback_period: 240,
            top_quintile: 10,
            min_history_bars: 100,
            initial_cash: 100_000.0,
            commission: CommissionModel::Free,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.lookback_period == 0 {
            return Err(SetupError::InvalidConfig(
                "lookback_period must be >= 1".into(),
            ));
        }
        if self.top_quintile == 0 {
            return Err(SetupError::InvalidConfig(
                "top_quintile must be >= 1".into(),
            ));
        }
        if !(self.initial_cash > 0.0) {
            return Err(SetupError::InvalidConfig(
                "initial_cash must be positive".into(),
            ));
        }
        Ok(())
    }
}
