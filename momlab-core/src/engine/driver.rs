//! The simulation driver — an explicit, caller-owned bar loop.
//!
//! Per step: advance the calendar, feed newly revealed closes to the
//! momentum book (once each, in reveal order), run the rebalance policy on
//! month boundaries, then snapshot portfolio and benchmark value. The
//! driver never rewinds or reprocesses a date; decisions at a bar use only
//! data revealed at or before that bar.

use crate::calendar::CalendarSync;
use crate::config::SimConfig;
use crate::domain::{Bar, Position, RejectedOrder, TradeRecord};
use crate::error::SetupError;
use crate::feed::AssetFeed;
use crate::indicators::MomentumBook;
use crate::ledger::PortfolioLedger;
use crate::policy::RebalancePolicy;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Single point in a dated value curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub equity: f64,
}

/// Complete result of a simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Daily portfolio value, one point per benchmark bar.
    pub equity_curve: Vec<EquityPoint>,
    /// Buy-and-hold benchmark scaled to the starting cash.
    pub benchmark_curve: Vec<EquityPoint>,
    /// Append-only round-trip log.
    pub trades: Vec<TradeRecord>,
    /// Orders refused by the ledger, with reasons.
    pub rejected_orders: Vec<RejectedOrder>,
    /// Positions still open when the run ended, sorted by symbol.
    pub open_positions: Vec<Position>,
    pub rebalance_count: usize,
    pub bar_count: usize,
    pub initial_cash: f64,
    pub final_cash: f64,
    pub final_equity: f64,
}

#[derive(Debug)]
pub struct Driver {
    calendar: CalendarSync,
    momentum: MomentumBook,
    ledger: PortfolioLedger,
    policy: RebalancePolicy,
    initial_cash: f64,
    /// Closes already consumed by the indicator, per asset feed.
    consumed: Vec<usize>,
    /// Last revealed close per symbol; positions are marked at these.
    last_close: HashMap<String, f64>,
}

impl Driver {
    /// Validate inputs and assemble a run. Fails fast on an empty benchmark,
    /// non-monotonic or NaN series, or a universe where no series is long
    /// enough for the momentum lookback.
    pub fn new(
        config: &SimConfig,
        benchmark_bars: Vec<Bar>,
        asset_series: Vec<(String, Vec<Bar>)>,
    ) -> Result<Self, SetupError> {
        config.validate()?;

        let benchmark_bars = clip_start(benchmark_bars, config.start_date);
        if benchmark_bars.is_empty() {
            return Err(SetupError::EmptyBenchmark);
        }
        let benchmark_symbol = benchmark_bars[0].symbol.clone();
        let benchmark = AssetFeed::new(benchmark_symbol, benchmark_bars)?;

        let mut feeds = Vec::with_capacity(asset_series.len());
        for (symbol, bars) in asset_series {
            let bars = clip_start(bars, config.start_date);
            feeds.push(AssetFeed::new(symbol, bars)?);
        }
        if !feeds.iter().any(|f| f.len_total() > config.lookback_period) {
            return Err(SetupError::InsufficientHistory {
                lookback: config.lookback_period,
            });
        }

        let consumed = vec![0; feeds.len()];
        Ok(Self {
            calendar: CalendarSync::new(benchmark, feeds),
            momentum: MomentumBook::new(config.lookback_period),
            ledger: PortfolioLedger::new(config.initial_cash, config.commission),
            policy: RebalancePolicy::new(config.top_quintile, config.min_history_bars),
            initial_cash: config.initial_cash,
            consumed,
            last_close: HashMap::new(),
        })
    }

    /// Run to completion: the loop ends when the benchmark feed is exhausted.
    pub fn run(mut self) -> RunResult {
        let mut equity_curve = Vec::new();
        let mut benchmark_curve = Vec::new();
        let mut rebalance_count = 0;
        let mut benchmark_base: Option<f64> = None;

        while let Some(step) = self.calendar.step() {
            // Indicator updates: each newly revealed close exactly once.
            for (i, feed) in self.calendar.feeds().iter().enumerate() {
                let revealed = feed.len_revealed();
                for bar in &feed.revealed_bars()[self.consumed[i]..] {
                    self.momentum.update(feed.symbol(), bar.close);
                    self.last_close.insert(feed.symbol().to_string(), bar.close);
                }
                self.consumed[i] = revealed;
            }

            if step.month_boundary {
                let month = (step.date.year(), step.date.month());
                self.policy.rebalance(
                    month,
                    step.date,
                    self.calendar.feeds(),
                    &self.momentum,
                    &self.last_close,
                    &mut self.ledger,
                );
                rebalance_count += 1;
            }

            equity_curve.push(EquityPoint {
                date: step.date,
                equity: self.ledger.value(&self.last_close),
            });

            let benchmark_close = self
                .calendar
                .benchmark()
                .current()
                .expect("benchmark bar must exist after a successful step")
                .close;
            let base = *benchmark_base.get_or_insert(benchmark_close);
            benchmark_curve.push(EquityPoint {
                date: step.date,
                equity: self.initial_cash * benchmark_close / base,
            });
        }

        let final_equity = equity_curve
            .last()
            .map(|p| p.equity)
            .unwrap_or(self.initial_cash);
        let bar_count = equity_curve.len();
        let final_cash = self.ledger.cash();
        let open_positions = self.ledger.positions();
        let (trades, rejected_orders) = self.ledger.into_logs();

        RunResult {
            equity_curve,
            benchmark_curve,
            trades,
            rejected_orders,
            open_positions,
            rebalance_count,
            bar_count,
            initial_cash: self.initial_cash,
            final_cash,
            final_equity,
        }
    }
}

fn clip_start(bars: Vec<Bar>, start: Option<NaiveDate>) -> Vec<Bar> {
    match start {
        Some(start) => bars.into_iter().filter(|b| b.date >= start).collect(),
        None => bars,
    }
}
