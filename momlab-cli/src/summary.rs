//! Run summary statistics printed by the CLI and exported as JSON.

use momlab_core::engine::{EquityPoint, RunResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub initial_cash: f64,
    pub final_equity: f64,
    /// Fractional return, e.g. 0.25 = 25%.
    pub total_return: f64,
    /// Buy-and-hold benchmark return over the same dates.
    pub benchmark_return: f64,
    /// Largest peak-to-trough decline as a fraction of the peak.
    pub max_drawdown: f64,
    pub num_trades: usize,
    pub win_rate: f64,
    pub rejected_orders: usize,
    pub rebalances: usize,
    pub bars: usize,
}

impl RunSummary {
    pub fn from_result(result: &RunResult) -> Self {
        let total_return = (result.final_equity - result.initial_cash) / result.initial_cash;
        let benchmark_return = match (
            result.benchmark_curve.first(),
            result.benchmark_curve.last(),
        ) {
            (Some(first), Some(last)) if first.equity > 0.0 => {
                (last.equity - first.equity) / first.equity
            }
            _ => 0.0,
        };

        let num_trades = result.trades.len();
        let winners = result.trades.iter().filter(|t| t.is_winner()).count();
        let win_rate = if num_trades > 0 {
            winners as f64 / num_trades as f64
        } else {
            0.0
        };

        Self {
            initial_cash: result.initial_cash,
            final_equity: result.final_equity,
            total_return,
            benchmark_return,
            max_drawdown: max_drawdown(&result.equity_curve),
            num_trades,
            win_rate,
            rejected_orders: result.rejected_orders.len(),
            rebalances: result.rebalance_count,
            bars: result.bar_count,
        }
    }
}

fn max_drawdown(curve: &[EquityPoint]) -> f64 {
    let Some(first) = curve.first() else {
        return 0.0;
    };
    let mut peak = first.equity;
    let mut max_dd = 0.0;
    for point in curve {
        if point.equity > peak {
            peak = point.equity;
        }
        let dd = (peak - point.equity) / peak;
        if dd > max_dd {
            max_dd = dd;
        }
    }
    max_dd
}
