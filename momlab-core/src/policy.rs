//! Monthly rebalance policy — rank by momentum, hold the top K equal-weight.
//!
//! The policy is stateless between triggers: each month boundary it reads
//! the indicator book and the ledger, fully liquidates the book, and
//! rebuilds it from scratch. Positions that stay in the new selection are
//! liquidated and re-bought like everything else — the book is rebuilt, not
//! diffed, round-trip commission included.

use crate::domain::Order;
use crate::feed::AssetFeed;
use crate::indicators::MomentumBook;
use crate::ledger::PortfolioLedger;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Transient record of one rebalance trigger. Produced for the driver's
/// bookkeeping; only the ledger's trade and rejection logs persist.
#[derive(Debug, Clone)]
pub struct RebalanceEvent {
    pub month: (i32, u32),
    pub ranked: Vec<String>,
    pub selected: Vec<String>,
    pub orders: Vec<Order>,
}

#[derive(Debug, Clone)]
pub struct RebalancePolicy {
    top_quintile: usize,
    min_history_bars: usize,
}

impl RebalancePolicy {
    pub fn new(top_quintile: usize, min_history_bars: usize) -> Self {
        assert!(top_quintile >= 1, "top_quintile must be >= 1");
        Self {
            top_quintile,
            min_history_bars,
        }
    }

    /// Run one rebalance against the ledger.
    ///
    /// All closes are applied before any buy, so proceeds from the
    /// liquidation fund the new book. Target sizes are floor(value / K /
    /// close) whole shares of the post-liquidation portfolio value.
    pub fn rebalance(
        &self,
        month: (i32, u32),
        date: NaiveDate,
        feeds: &[AssetFeed],
        momentum: &MomentumBook,
        prices: &HashMap<String, f64>,
        ledger: &mut PortfolioLedger,
    ) -> RebalanceEvent {
        // Eligibility: enough revealed history to trust the signal. Ranking
        // is a stable descending sort; assets whose momentum window has not
        // filled yet rank below every ready value, in iteration order.
        let mut ranked: Vec<(String, f64)> = feeds
            .iter()
            .filter(|f| f.len_revealed() > self.min_history_bars)
            .map(|f| {
                let score = momentum
                    .value(f.symbol())
                    .unwrap_or(f64::NEG_INFINITY);
                (f.symbol().to_string(), score)
            })
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let mut orders = Vec::new();

        // Close the entire book before sizing anything new.
        for symbol in ledger.open_symbols() {
            let Some(&price) = prices.get(&symbol) else {
                continue;
            };
            if let Some(pos) = ledger.position(&symbol) {
                orders.push(Order {
                    symbol: symbol.clone(),
                    delta_size: -pos.size,
                    date,
                });
            }
            ledger.close(&symbol, price, date);
        }

        let k = self.top_quintile.min(ranked.len());
        let selected: Vec<String> = ranked.iter().take(k).map(|(s, _)| s.clone()).collect();

        if k > 0 {
            let portfolio_value = ledger.value(prices);
            let weight = 1.0 / k as f64;
            for symbol in &selected {
                let Some(&price) = prices.get(symbol) else {
                    continue;
                };
                let size = (portfolio_value * weight / price).floor() as i64;
                orders.push(Order {
                    symbol: symbol.clone(),
                    delta_size: size,
                    date,
                });
                ledger.buy(symbol, size, price, date);
            }
        }

        RebalanceEvent {
            month,
            ranked: ranked.into_iter().map(|(s, _)| s).collect(),
            selected,
            orders,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::CommissionModel;
    use crate::domain::Bar;
    use crate::feed::AssetFeed;

    fn flat_feed(symbol: &str, close: f64, bars: usize) -> AssetFeed {
        let base = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
        let series: Vec<Bar> = (0..bars)
            .map(|i| Bar {
                symbol: symbol.into(),
                date: base + chrono::Duration::days(i as i64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1000,
            })
            .collect();
        let mut feed = AssetFeed::new(symbol, series).unwrap();
        while feed.advance() {}
        feed
    }

    fn trigger_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 5, 4).unwrap()
    }

    /// Feeds, a momentum book with fixed readings, and the price map.
    fn setup(
        entries: &[(&str, f64, Option<f64>)],
        bars: usize,
    ) -> (Vec<AssetFeed>, MomentumBook, HashMap<String, f64>) {
        let mut feeds = Vec::new();
        let mut book = MomentumBook::new(1);
        let mut prices = HashMap::new();
        for &(symbol, close, score) in entries {
            feeds.push(flat_feed(symbol, close, bars));
            prices.insert(symbol.to_string(), close);
            if let Some(score) = score {
                // Two closes produce momentum = score with lookback 1.
                book.update(symbol, 1.0);
                book.update(symbol, 1.0 + score);
            }
        }
        (feeds, book, prices)
    }

    #[test]
    fn stable_descending_ranking_breaks_ties_by_input_order() {
        let (feeds, book, prices) = setup(
            &[
                ("AAA", 10.0, Some(0.5)),
                ("BBB", 10.0, Some(0.5)),
                ("CCC", 10.0, Some(0.3)),
            ],
            150,
        );
        let mut ledger = PortfolioLedger::new(10_000.0, CommissionModel::Free);
        let policy = RebalancePolicy::new(2, 100);
        let event = policy.rebalance((2020, 5), trigger_date(), &feeds, &book, &prices, &mut ledger);

        assert_eq!(event.ranked, vec!["AAA", "BBB", "CCC"]);
        assert_eq!(event.selected, vec!["AAA", "BBB"]);
    }

    #[test]
    fn unready_momentum_ranks_below_ready_values() {
        let (feeds, book, prices) = setup(
            &[
                ("AAA", 10.0, None),
                ("BBB", 10.0, Some(-0.9)),
                ("CCC", 10.0, None),
            ],
            150,
        );
        let mut ledger = PortfolioLedger::new(10_000.0, CommissionModel::Free);
        let policy = RebalancePolicy::new(3, 100);
        let event = policy.rebalance((2020, 5), trigger_date(), &feeds, &book, &prices, &mut ledger);

        assert_eq!(event.ranked, vec!["BBB", "AAA", "CCC"]);
    }

    #[test]
    fn short_history_assets_are_not_eligible() {
        let (mut feeds, book, prices) = setup(
            &[("AAA", 10.0, Some(0.5)), ("NEW", 10.0, Some(2.0))],
            150,
        );
        // NEW listed recently: only 80 bars revealed.
        feeds[1] = flat_feed("NEW", 10.0, 80);
        let mut ledger = PortfolioLedger::new(10_000.0, CommissionModel::Free);
        let policy = RebalancePolicy::new(2, 100);
        let event = policy.rebalance((2020, 5), trigger_date(), &feeds, &book, &prices, &mut ledger);

        assert_eq!(event.ranked, vec!["AAA"]);
        assert_eq!(event.selected, vec!["AAA"]);
    }

    #[test]
    fn equal_weight_sizes_floor_to_whole_shares() {
        let (feeds, book, prices) = setup(
            &[("AAA", 300.0, Some(0.5)), ("BBB", 70.0, Some(0.4))],
            150,
        );
        let mut ledger = PortfolioLedger::new(10_000.0, CommissionModel::Free);
        let policy = RebalancePolicy::new(2, 100);
        policy.rebalance((2020, 5), trigger_date(), &feeds, &book, &prices, &mut ledger);

        // 10_000 / 2 = 5_000 per asset: floor(5000/300)=16, floor(5000/70)=71.
        assert_eq!(ledger.position("AAA").unwrap().size, 16);
        assert_eq!(ledger.position("BBB").unwrap().size, 71);
    }

    #[test]
    fn fewer_eligible_than_k_splits_across_what_qualifies() {
        let (feeds, book, prices) = setup(&[("AAA", 100.0, Some(0.5))], 150);
        let mut ledger = PortfolioLedger::new(10_000.0, CommissionModel::Free);
        let policy = RebalancePolicy::new(10, 100);
        let event = policy.rebalance((2020, 5), trigger_date(), &feeds, &book, &prices, &mut ledger);

        // Weight is 1/1, not 1/10.
        assert_eq!(event.selected, vec!["AAA"]);
        assert_eq!(ledger.position("AAA").unwrap().size, 100);
    }

    #[test]
    fn no_eligible_assets_liquidates_to_cash() {
        let (feeds, book, prices) = setup(&[("AAA", 100.0, Some(0.5))], 50);
        let mut ledger = PortfolioLedger::new(10_000.0, CommissionModel::Free);
        // Seed an open position from a previous period.
        ledger.buy("AAA", 10, 100.0, trigger_date());

        let policy = RebalancePolicy::new(5, 100);
        let event = policy.rebalance((2020, 5), trigger_date(), &feeds, &book, &prices, &mut ledger);

        assert!(event.ranked.is_empty());
        assert!(event.selected.is_empty());
        assert!(ledger.open_symbols().is_empty());
        assert_eq!(ledger.cash(), 10_000.0);
    }

    #[test]
    fn existing_book_is_liquidated_before_buying() {
        let (feeds, book, prices) = setup(
            &[("AAA", 100.0, Some(0.5)), ("BBB", 100.0, Some(0.9))],
            150,
        );
        let mut ledger = PortfolioLedger::new(10_000.0, CommissionModel::Free);
        ledger.buy("AAA", 100, 100.0, trigger_date()); // all-in on AAA

        let policy = RebalancePolicy::new(1, 100);
        let event = policy.rebalance((2020, 5), trigger_date(), &feeds, &book, &prices, &mut ledger);

        // AAA's round-trip funds the BBB buy.
        assert_eq!(event.selected, vec!["BBB"]);
        assert!(ledger.position("AAA").is_none());
        assert_eq!(ledger.position("BBB").unwrap().size, 100);
        assert_eq!(ledger.trades().len(), 1);

        // The emitted order batch lists the close ahead of the buy.
        assert_eq!(event.orders.len(), 2);
        assert_eq!(event.orders[0].symbol, "AAA");
        assert_eq!(event.orders[0].delta_size, -100);
        assert_eq!(event.orders[1].symbol, "BBB");
        assert_eq!(event.orders[1].delta_size, 100);
    }
}
