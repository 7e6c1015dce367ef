// In crates/core-types/src/error.rs

use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("Price bar at index {index} is older than the bar before it")]
    UnorderedBars { index: usize },

    #[error("Duplicate price bar for timestamp {timestamp}")]
    DuplicateTimestamp { timestamp: NaiveDateTime },
}

pub type Result<T> = std::result::Result<T, Error>;
