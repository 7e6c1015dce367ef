// In crates/core-types/src/types.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::error::{Error, Result};

/// A single daily OHLCV bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// The time the bar opened. Serialized as `datetime` on the wire.
    #[serde(rename = "datetime")]
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

/// An immutable, strictly ascending sequence of price bars.
///
/// The signal engine works on array positions, not on timestamp arithmetic, so
/// the only guarantee this type carries is ordering. Gaps between bars are fine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Builds a series, rejecting bars that are out of order or share a timestamp.
    pub fn new(bars: Vec<PriceBar>) -> Result<Self> {
        for (index, pair) in bars.windows(2).enumerate() {
            match pair[0].timestamp.cmp(&pair[1].timestamp) {
                Ordering::Less => {}
                Ordering::Equal => {
                    return Err(Error::DuplicateTimestamp {
                        timestamp: pair[1].timestamp,
                    });
                }
                Ordering::Greater => return Err(Error::UnorderedBars { index: index + 1 }),
            }
        }
        Ok(Self { bars })
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    /// The close price of every bar, in series order.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.close).collect()
    }

    /// The timestamp of every bar, in series order.
    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        self.bars.iter().map(|bar| bar.timestamp).collect()
    }
}

impl TryFrom<Vec<PriceBar>> for PriceSeries {
    type Error = Error;

    fn try_from(bars: Vec<PriceBar>) -> Result<Self> {
        Self::new(bars)
    }
}

/// The discrete output of a crossover strategy at one bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    #[default]
    None,
    /// Golden cross: the short average moved above the long one.
    Buy,
    /// Death cross: the short average moved below the long one.
    Sell,
}

impl Signal {
    /// Whether this signal represents a trade event.
    pub fn is_trade(&self) -> bool {
        !matches!(self, Signal::None)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::None => "NONE",
            Signal::Buy => "BUY",
            Signal::Sell => "SELL",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
