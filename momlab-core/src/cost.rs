//! Commission model — the only execution friction this engine charges.

use serde::{Deserialize, Serialize};

/// Commission charged per executed order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CommissionModel {
    /// No commission.
    #[default]
    Free,
    /// Flat fee per executed order, regardless of size.
    Flat { fee: f64 },
    /// Fraction of traded notional, e.g. 0.001 = 10 bps per side.
    Proportional { rate: f64 },
}

impl CommissionModel {
    /// Commission for one order filled at `price` for `size` shares.
    pub fn compute(&self, price: f64, size: i64) -> f64 {
        match self {
            CommissionModel::Free => 0.0,
            CommissionModel::Flat { fee } => *fee,
            CommissionModel::Proportional { rate } => price * size as f64 * rate,
        }
    }
}
