//! Orders and their outcomes.
//!
//! All orders are market orders filled entirely at the current bar's close;
//! there is no queuing across bars and no partial fill. Outcomes come back
//! as explicit variants rather than broker callbacks: a ledger operation
//! either fills, rejects with a recorded reason, or is a no-op.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderSide {
    Buy,
    Sell,
}

/// A market order intent: signed share delta requested at a given bar date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub symbol: String,
    pub delta_size: i64,
    pub date: NaiveDate,
}

/// An executed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fill {
    pub symbol: String,
    pub date: NaiveDate,
    pub side: OrderSide,
    pub size: i64,
    pub price: f64,
    pub commission: f64,
}

/// Why an order was refused. Rejection is expected broker behavior, not a
/// defect: the run continues and the rejection is logged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectReason {
    InsufficientCash { required: f64, available: f64 },
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::InsufficientCash {
                required,
                available,
            } => write!(
                f,
                "insufficient cash: required {required:.2}, available {available:.2}"
            ),
        }
    }
}

/// A refused order, recorded in the ledger's rejection log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectedOrder {
    pub symbol: String,
    pub date: NaiveDate,
    pub size: i64,
    pub price: f64,
    pub reason: RejectReason,
}

/// Outcome of applying an order to the ledger.
#[derive(Debug, Clone)]
pub enum OrderOutcome {
    Filled(Fill),
    Rejected(RejectedOrder),
    /// A size-0 request; nothing happened and nothing was recorded.
    Noop,
}

impl OrderOutcome {
    pub fn is_filled(&self) -> bool {
        matches!(self, OrderOutcome::Filled(_))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, OrderOutcome::Rejected(_))
    }
}
