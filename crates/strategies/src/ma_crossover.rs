// In crates/strategies/src/ma_crossover.rs

use crate::sma::{WARMUP_SENTINEL, moving_average};
use crate::types::{CrossoverSeries, MACrossoverSettings};
use crate::{Signal, Strategy};

/// Simple moving-average crossover strategy.
///
/// Emits `Buy` on a golden cross and `Sell` on a death cross of the short and
/// long averages of the close price.
#[derive(Debug, Clone)]
pub struct MACrossover {
    /// The configuration for this strategy instance.
    settings: MACrossoverSettings,
}

impl MACrossover {
    /// Creates a new `MACrossover` strategy instance from its settings.
    pub fn new(settings: MACrossoverSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &MACrossoverSettings {
        &self.settings
    }
}

impl Strategy for MACrossover {
    fn name(&self) -> &'static str {
        "MACrossover"
    }

    fn warmup_period(&self) -> usize {
        self.settings.long_window.saturating_sub(1)
    }

    fn assess(&self, closes: &[f64]) -> CrossoverSeries {
        let short_ma = moving_average(closes, self.settings.short_window);
        let long_ma = moving_average(closes, self.settings.long_window);
        let signals = detect_crossovers(&short_ma, &long_ma);

        CrossoverSeries {
            short_ma,
            long_ma,
            signals,
        }
    }
}

/// Compares two index-aligned averages and classifies every bar.
///
/// Bars where either average is still the warm-up sentinel are `None`. Equality
/// at the previous bar satisfies both the golden and the death cross
/// precondition, so a flat pair that diverges is classified by the direction it
/// diverges in.
pub fn detect_crossovers(short_ma: &[f64], long_ma: &[f64]) -> Vec<Signal> {
    let len = short_ma.len().min(long_ma.len());
    let mut signals = vec![Signal::None; len];

    for i in 1..len {
        if short_ma[i] == WARMUP_SENTINEL || long_ma[i] == WARMUP_SENTINEL {
            continue;
        }

        let (prev_short, prev_long) = (short_ma[i - 1], long_ma[i - 1]);
        let (short, long) = (short_ma[i], long_ma[i]);

        signals[i] = if prev_short <= prev_long && short > long {
            // Golden cross: short average moved above the long one.
            Signal::Buy
        } else if prev_short >= prev_long && short < long {
            // Death cross: short average moved below the long one.
            Signal::Sell
        } else {
            Signal::None
        };
    }

    signals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_golden_and_death_crosses() {
        let short = [0.0, 0.0, 1.0, 3.0, 1.0];
        let long = [0.0, 0.0, 2.0, 2.0, 2.0];
        assert_eq!(
            detect_crossovers(&short, &long),
            vec![
                Signal::None,
                Signal::None,
                Signal::Sell,
                Signal::Buy,
                Signal::Sell
            ]
        );
    }

    #[test]
    fn skips_bars_still_warming_up() {
        let short = [0.0, 5.0, 6.0];
        let long = [0.0, 0.0, 0.0];
        assert_eq!(detect_crossovers(&short, &long), vec![Signal::None; 3]);
    }

    #[test]
    fn flat_then_rising_is_a_buy() {
        let short = [2.0, 2.0, 3.0];
        let long = [2.0, 2.0, 1.0];
        assert_eq!(
            detect_crossovers(&short, &long),
            vec![Signal::None, Signal::None, Signal::Buy]
        );
    }

    #[test]
    fn flat_then_falling_is_a_sell() {
        let short = [2.0, 2.0, 1.0];
        let long = [2.0, 2.0, 3.0];
        assert_eq!(
            detect_crossovers(&short, &long),
            vec![Signal::None, Signal::None, Signal::Sell]
        );
    }

    #[test]
    fn staying_above_is_not_a_cross() {
        let short = [3.0, 4.0, 5.0];
        let long = [2.0, 2.0, 2.0];
        assert_eq!(detect_crossovers(&short, &long), vec![Signal::None; 3]);
    }

    #[test]
    fn empty_input_gives_no_signals() {
        assert!(detect_crossovers(&[], &[]).is_empty());
    }

    #[test]
    fn assess_keeps_all_series_aligned() {
        let closes: Vec<f64> = (0..25).map(|i| 100.0 + f64::from(i)).collect();
        let strategy = MACrossover::new(MACrossoverSettings::new(3, 8));
        let series = strategy.assess(&closes);

        assert_eq!(series.short_ma.len(), closes.len());
        assert_eq!(series.long_ma.len(), closes.len());
        assert_eq!(series.signals.len(), closes.len());
        assert_eq!(strategy.warmup_period(), 7);
        assert_eq!(strategy.name(), "MACrossover");
    }

    #[test]
    fn v_shaped_prices_produce_a_sell_then_a_buy() {
        // Falls for 15 bars then rises for 15: the short average drops under the
        // long one as soon as both exist and crosses back up after the bottom.
        let closes: Vec<f64> = (0..15)
            .map(|i| 130.0 - f64::from(i) * 2.0)
            .chain((0..15).map(|i| 102.0 + f64::from(i) * 2.0))
            .collect();
        let strategy = MACrossover::new(MACrossoverSettings::new(3, 6));
        let trades: Vec<Signal> = strategy
            .assess(&closes)
            .signals
            .into_iter()
            .filter(Signal::is_trade)
            .collect();

        assert_eq!(trades, vec![Signal::Sell, Signal::Buy]);
    }
}
