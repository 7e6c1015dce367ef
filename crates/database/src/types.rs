// In crates/database/src/types.rs

use chrono::NaiveDateTime;
use core_types::PriceBar;
use serde::{Deserialize, Serialize};

/// A price bar together with its row id in the store.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoredBar {
    pub id: i64,
    #[serde(flatten)]
    pub bar: PriceBar,
}

/// Raw row of the `stock_data` table.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct StockDataRow {
    pub id: i64,
    pub datetime: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

impl From<StockDataRow> for StoredBar {
    fn from(row: StockDataRow) -> Self {
        Self {
            id: row.id,
            bar: PriceBar {
                timestamp: row.datetime,
                open: row.open,
                high: row.high,
                low: row.low,
                close: row.close,
                volume: row.volume,
            },
        }
    }
}
