//! Simulation driver and run results.

mod driver;

pub use driver::{Driver, EquityPoint, RunResult};
