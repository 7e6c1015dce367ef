// In crates/strategies/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("Short window must be less than long window")]
    InvalidWindows { short_window: usize, long_window: usize },

    #[error("Window lengths must be greater than 0")]
    ZeroWindow,
}

pub type Result<T> = std::result::Result<T, Error>;
