// In crates/strategies/src/types.rs

use core_types::Signal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Window lengths for the moving-average crossover strategy.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct MACrossoverSettings {
    /// Bars in the fast ("short") average.
    pub short_window: usize,
    /// Bars in the slow ("long") average.
    pub long_window: usize,
}

impl Default for MACrossoverSettings {
    fn default() -> Self {
        Self {
            short_window: 10,
            long_window: 30,
        }
    }
}

impl MACrossoverSettings {
    pub fn new(short_window: usize, long_window: usize) -> Self {
        Self {
            short_window,
            long_window,
        }
    }

    /// Checks the caller-side contract. The strategy itself tolerates any
    /// window pair, so this is only used at user-facing boundaries.
    pub fn validate(&self) -> Result<()> {
        if self.short_window == 0 || self.long_window == 0 {
            return Err(Error::ZeroWindow);
        }
        if self.short_window >= self.long_window {
            return Err(Error::InvalidWindows {
                short_window: self.short_window,
                long_window: self.long_window,
            });
        }
        Ok(())
    }
}

/// The full output of one crossover assessment, index-aligned with the input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrossoverSeries {
    pub short_ma: Vec<f64>,
    pub long_ma: Vec<f64>,
    pub signals: Vec<Signal>,
}
