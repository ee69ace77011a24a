//! Rate-of-change momentum over a fixed lookback window.
//!
//! momentum[t] = close[t] / close[t - lookback] - 1
//! Not ready until lookback + 1 closes have been observed.
//!
//! State is an explicit bounded ring of the last `lookback + 1` closes,
//! updated exactly once per revealed bar in reveal order — O(1) per update,
//! never recomputed retroactively.

use std::collections::{HashMap, VecDeque};

/// Per-asset incremental momentum state.
#[derive(Debug, Clone)]
pub struct RollingMomentum {
    lookback: usize,
    closes: VecDeque<f64>,
}

impl RollingMomentum {
    pub fn new(lookback: usize) -> Self {
        assert!(lookback >= 1, "momentum lookback must be >= 1");
        Self {
            lookback,
            closes: VecDeque::with_capacity(lookback + 1),
        }
    }

    /// Observe the next close in bar order.
    pub fn update(&mut self, close: f64) {
        if self.closes.len() == self.lookback + 1 {
            self.closes.pop_front();
        }
        self.closes.push_back(close);
    }

    /// The current momentum reading, or `None` while the window is filling.
    pub fn value(&self) -> Option<f64> {
        if self.closes.len() < self.lookback + 1 {
            return None;
        }
        let oldest = self.closes.front()?;
        let newest = self.closes.back()?;
        Some(newest / oldest - 1.0)
    }

    pub fn lookback(&self) -> usize {
        self.lookback
    }

    pub fn observations(&self) -> usize {
        self.closes.len()
    }
}

/// Momentum states for a whole universe, keyed by symbol.
#[derive(Debug, Clone)]
pub struct MomentumBook {
    lookback: usize,
    by_symbol: HashMap<String, RollingMomentum>,
}

impl MomentumBook {
    pub fn new(lookback: usize) -> Self {
        assert!(lookback >= 1, "momentum lookback must be >= 1");
        Self {
            lookback,
            by_symbol: HashMap::new(),
        }
    }

    /// Observe one revealed close for `symbol`. Called once per bar reveal,
    /// in reveal order.
    pub fn update(&mut self, symbol: &str, close: f64) {
        self.by_symbol
            .entry(symbol.to_string())
            .or_insert_with(|| RollingMomentum::new(self.lookback))
            .update(close);
    }

    /// Momentum for `symbol`, or `None` if unknown or not yet ready.
    pub fn value(&self, symbol: &str) -> Option<f64> {
        self.by_symbol.get(symbol).and_then(|m| m.value())
    }

    pub fn lookback(&self) -> usize {
        self.lookback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn momentum_not_ready_until_lookback_plus_one() {
        let mut mom = RollingMomentum::new(2);
        mom.update(100.0);
        assert_eq!(mom.value(), None);
        mom.update(110.0);
        assert_eq!(mom.value(), None);
        mom.update(121.0);
        // 121 / 100 - 1 = 0.21
        assert_approx(mom.value().unwrap(), 0.21, DEFAULT_EPSILON);
    }

    #[test]
    fn momentum_window_slides() {
        let mut mom = RollingMomentum::new(1);
        mom.update(100.0);
        mom.update(110.0);
        assert_approx(mom.value().unwrap(), 0.10, DEFAULT_EPSILON);
        mom.update(99.0);
        // 99 / 110 - 1 = -0.1
        assert_approx(mom.value().unwrap(), -0.1, DEFAULT_EPSILON);
    }

    #[test]
    fn momentum_matches_naive_recompute() {
        let closes: Vec<f64> = (1..=30).map(|i| 100.0 + (i as f64) * 1.5).collect();
        let lookback = 7;
        let mut mom = RollingMomentum::new(lookback);
        for (t, &close) in closes.iter().enumerate() {
            mom.update(close);
            if t >= lookback {
                let expected = closes[t] / closes[t - lookback] - 1.0;
                assert_approx(mom.value().unwrap(), expected, DEFAULT_EPSILON);
            } else {
                assert_eq!(mom.value(), None);
            }
        }
    }

    #[test]
    fn ring_stays_bounded() {
        let mut mom = RollingMomentum::new(3);
        for i in 0..100 {
            mom.update(i as f64 + 1.0);
        }
        assert_eq!(mom.observations(), 4);
    }

    #[test]
    fn book_tracks_symbols_independently() {
        let mut book = MomentumBook::new(1);
        book.update("AAA", 100.0);
        book.update("BBB", 200.0);
        assert_eq!(book.value("AAA"), None);
        book.update("AAA", 150.0);
        assert_approx(book.value("AAA").unwrap(), 0.5, DEFAULT_EPSILON);
        assert_eq!(book.value("BBB"), None);
        assert_eq!(book.value("CCC"), None);
    }
}
