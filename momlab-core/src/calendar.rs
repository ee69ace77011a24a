//! Calendar synchronizer — one logical clock across ragged feeds.
//!
//! The benchmark feed defines the master calendar. Each `step()` reveals the
//! benchmark's next bar, then catches every asset feed up to that date:
//! feeds that list later simply wait, feeds that run out stop advancing
//! without stalling the clock. The first time a (year, month) pair is
//! observed on the benchmark, the step reports a month-boundary crossing.

use crate::feed::AssetFeed;
use chrono::{Datelike, NaiveDate};
use std::collections::HashSet;

/// One tick of the simulation clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockStep {
    pub date: NaiveDate,
    pub month_boundary: bool,
}

#[derive(Debug)]
pub struct CalendarSync {
    benchmark: AssetFeed,
    feeds: Vec<AssetFeed>,
    seen_months: HashSet<(i32, u32)>,
}

impl CalendarSync {
    pub fn new(benchmark: AssetFeed, feeds: Vec<AssetFeed>) -> Self {
        Self {
            benchmark,
            feeds,
            seen_months: HashSet::new(),
        }
    }

    /// Drive one logical day forward. Returns `None` when the benchmark is
    /// exhausted, which terminates the run.
    pub fn step(&mut self) -> Option<ClockStep> {
        if !self.benchmark.advance() {
            return None;
        }
        let date = self
            .benchmark
            .current()
            .expect("benchmark bar must exist after a successful advance")
            .date;

        // Catch asset feeds up to the master date. A feed may reveal several
        // bars in one step if its calendar has dates the benchmark skips.
        for feed in &mut self.feeds {
            while feed.next_date().is_some_and(|d| d <= date) {
                feed.advance();
            }
        }

        let month_boundary = self.seen_months.insert((date.year(), date.month()));
        Some(ClockStep {
            date,
            month_boundary,
        })
    }

    pub fn benchmark(&self) -> &AssetFeed {
        &self.benchmark
    }

    pub fn feeds(&self) -> &[AssetFeed] {
        &self.feeds
    }
}
