//! TradeRecord — a completed round-trip with gross and net PnL.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A complete round-trip trade: entry → exit.
///
/// `commission` is the total charged across both sides of the round-trip;
/// `net_pnl = gross_pnl - commission`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRecord {
    pub symbol: String,
    pub entry_date: NaiveDate,
    pub exit_date: NaiveDate,
    pub entry_price: f64,
    pub exit_price: f64,
    pub size: i64,
    pub gross_pnl: f64,
    pub commission: f64,
    pub net_pnl: f64,
}

impl TradeRecord {
    /// Return on the trade as a fraction of entry cost.
    pub fn return_pct(&self) -> f64 {
        if self.entry_price == 0.0 || self.size == 0 {
            return 0.0;
        }
        self.net_pnl / (self.entry_price * self.size as f64)
    }

    pub fn is_winner(&self) -> bool {
        self.net_pnl > 0.0
    }
}
