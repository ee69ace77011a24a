//! Portfolio ledger — cash, positions, and the append-only logs.
//!
//! The accounting identity must hold at every bar:
//! `portfolio value == cash + sum(position size * last known close)`.
//! Cash never goes negative: a buy whose cost plus commission exceeds
//! available cash is rejected and logged, never partially filled.

use crate::cost::CommissionModel;
use crate::domain::{
    Fill, OrderOutcome, OrderSide, Position, RejectReason, RejectedOrder, TradeRecord,
};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone)]
pub struct PortfolioLedger {
    cash: f64,
    // BTreeMap: iteration order is part of the determinism guarantee.
    positions: BTreeMap<String, Position>,
    trades: Vec<TradeRecord>,
    rejected: Vec<RejectedOrder>,
    commission: CommissionModel,
}

impl PortfolioLedger {
    pub fn new(initial_cash: f64, commission: CommissionModel) -> Self {
        Self {
            cash: initial_cash,
            positions: BTreeMap::new(),
            trades: Vec::new(),
            rejected: Vec::new(),
            commission,
        }
    }

    pub fn cash(&self) -> f64 {
        self.cash
    }

    /// Total portfolio value: cash + open positions marked at `prices`.
    /// A symbol missing from `prices` falls back to its average cost.
    pub fn value(&self, prices: &HashMap<String, f64>) -> f64 {
        let position_value: f64 = self
            .positions
            .values()
            .map(|pos| {
                let price = prices.get(&pos.symbol).copied().unwrap_or(pos.avg_cost);
                pos.market_value(price)
            })
            .sum();
        self.cash + position_value
    }

    /// Symbols with an open position, in sorted order.
    pub fn open_symbols(&self) -> Vec<String> {
        self.positions.keys().cloned().collect()
    }

    pub fn position(&self, symbol: &str) -> Option<&Position> {
        self.positions.get(symbol)
    }

    /// Snapshot of all open positions, sorted by symbol.
    pub fn positions(&self) -> Vec<Position> {
        self.positions.values().cloned().collect()
    }

    pub fn trades(&self) -> &[TradeRecord] {
        &self.trades
    }

    pub fn rejected(&self) -> &[RejectedOrder] {
        &self.rejected
    }

    /// Buy `size` whole shares at `price`. A size-0 request is a no-op;
    /// a request the cash cannot cover is rejected and logged.
    pub fn buy(&mut self, symbol: &str, size: i64, price: f64, date: NaiveDate) -> OrderOutcome {
        if size <= 0 {
            return OrderOutcome::Noop;
        }
        let commission = self.commission.compute(price, size);
        let cost = price * size as f64 + commission;
        if cost > self.cash {
            let rejection = RejectedOrder {
                symbol: symbol.to_string(),
                date,
                size,
                price,
                reason: RejectReason::InsufficientCash {
                    required: cost,
                    available: self.cash,
                },
            };
            self.rejected.push(rejection.clone());
            return OrderOutcome::Rejected(rejection);
        }

        self.cash -= cost;
        match self.positions.get_mut(symbol) {
            Some(pos) => pos.add(size, price, commission),
            None => {
                self.positions.insert(
                    symbol.to_string(),
                    Position::new(symbol.to_string(), size, price, date, commission),
                );
            }
        }
        OrderOutcome::Filled(Fill {
            symbol: symbol.to_string(),
            date,
            side: OrderSide::Buy,
            size,
            price,
            commission,
        })
    }

    /// Sell the full current size at `price`, realize the round-trip, and
    /// append it to the trade log. Returns `None` if no position is open.
    pub fn close(&mut self, symbol: &str, price: f64, date: NaiveDate) -> Option<TradeRecord> {
        let pos = self.positions.remove(symbol)?;
        let exit_commission = self.commission.compute(price, pos.size);
        self.cash += price * pos.size as f64 - exit_commission;

        let gross_pnl = (price - pos.avg_cost) * pos.size as f64;
        let commission = pos.entry_commission + exit_commission;
        let trade = TradeRecord {
            symbol: pos.symbol,
            entry_date: pos.entry_date,
            exit_date: date,
            entry_price: pos.avg_cost,
            exit_price: price,
            size: pos.size,
            gross_pnl,
            commission,
            net_pnl: gross_pnl - commission,
        };
        self.trades.push(trade.clone());
        Some(trade)
    }

    /// Consume the ledger, yielding its append-only logs.
    pub fn into_logs(self) -> (Vec<TradeRecord>, Vec<RejectedOrder>) {
        (self.trades, self.rejected)
    }
}
