//! Position — an open long holding in whole shares.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An open long position. Sizes are whole shares and never negative; a
/// position that reaches size 0 is removed from the ledger rather than kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub symbol: String,
    pub size: i64,
    pub avg_cost: f64,
    pub entry_date: NaiveDate,
    /// Commission paid opening (and adding to) this position, carried so the
    /// round-trip net PnL can charge both sides.
    pub entry_commission: f64,
}

impl Position {
    pub fn new(symbol: String, size: i64, price: f64, date: NaiveDate, commission: f64) -> Self {
        Self {
            symbol,
            size,
            avg_cost: price,
            entry_date: date,
            entry_commission: commission,
        }
    }

    pub fn is_open(&self) -> bool {
        self.size > 0
    }

    pub fn market_value(&self, current_price: f64) -> f64 {
        self.size as f64 * current_price
    }

    pub fn unrealized_pnl(&self, current_price: f64) -> f64 {
        self.size as f64 * (current_price - self.avg_cost)
    }

    /// Fold an additional buy into this position, re-weighting the average cost.
    pub fn add(&mut self, size: i64, price: f64, commission: f64) {
        debug_assert!(size > 0, "add() requires a positive size");
        let old_notional = self.avg_cost * self.size as f64;
        let new_notional = price * size as f64;
        self.size += size;
        self.avg_cost = (old_notional + new_notional) / self.size as f64;
        self.entry_commission += commission;
    }
}
