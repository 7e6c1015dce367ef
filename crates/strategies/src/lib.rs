// In crates/strategies/src/lib.rs

pub mod error;
pub mod ma_crossover;
pub mod sma;
pub mod types;

pub use core_types::Signal;
pub use error::{Error, Result};
pub use types::{CrossoverSeries, MACrossoverSettings};

/// The universal interface for a signal-generating strategy.
///
/// A strategy turns an ordered close-price sequence into one `Signal` per bar,
/// together with the smoothed series the signals were derived from. It holds
/// only its configuration, so `assess` can be called concurrently on shared
/// references.
pub trait Strategy {
    /// The name of the strategy.
    fn name(&self) -> &'static str;

    /// Number of leading bars whose signals must be ignored because the
    /// strategy's slowest indicator is still warming up.
    fn warmup_period(&self) -> usize;

    fn assess(&self, closes: &[f64]) -> CrossoverSeries;
}
