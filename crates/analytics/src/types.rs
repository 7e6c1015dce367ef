// In crates/analytics/src/types.rs

use chrono::NaiveDateTime;
use core_types::Signal;
use serde::{Deserialize, Serialize};

/// One counted crossover event, as reported in a summary's detail list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalDetail {
    pub datetime: NaiveDateTime,
    pub close_price: f64,
    pub short_ma: f64,
    pub long_ma: f64,
    pub signal: Signal,
    /// Fixed per-event figure from the placeholder model, not a realized return.
    #[serde(rename = "return")]
    pub event_return: f64,
}

/// Aggregate result of evaluating a crossover strategy over a price series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PerformanceSummary {
    pub total_trades: u32,
    pub winning_trades: u32,
    pub losing_trades: u32,
    pub win_rate: f64,
    pub total_return: f64,
    /// The most recent counted events, oldest first.
    pub signals: Vec<SignalDetail>,
}

impl PerformanceSummary {
    /// Creates an empty summary: no trades, zero rates, no details.
    pub fn new() -> Self {
        Self::default()
    }
}
