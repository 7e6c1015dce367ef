// In crates/analytics/src/engine.rs

use crate::types::{PerformanceSummary, SignalDetail};
use core_types::{PriceSeries, Signal};
use rust_decimal::prelude::*;
use strategies::ma_crossover::MACrossover;
use strategies::{MACrossoverSettings, Strategy};

/// Upper bound on the number of events listed in a summary.
pub const MAX_SIGNAL_DETAILS: usize = 10;

// Fixed figures of the placeholder performance model.
const BUY_EVENT_RETURN: f64 = 0.02;
const SELL_EVENT_RETURN: f64 = -0.015;
const WIN_RETURN: f64 = 0.15;
const LOSS_RETURN: f64 = 0.08;

/// The engine responsible for turning a price series into a crossover
/// performance summary.
#[derive(Default)]
pub struct AnalyticsEngine;

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the crossover strategy over `series` and aggregates its signals.
    ///
    /// A series shorter than the long window yields an empty summary. Window
    /// ordering is not checked here; callers validate it up front.
    pub fn evaluate(
        &self,
        series: &PriceSeries,
        settings: &MACrossoverSettings,
    ) -> PerformanceSummary {
        if series.len() < settings.long_window {
            return PerformanceSummary::new(); // Not enough history for the long average.
        }

        // 1. Pull out the close prices and their timestamps.
        let closes = series.closes();
        let timestamps = series.timestamps();

        // 2. Smooth both windows and classify every bar.
        let strategy = MACrossover::new(*settings);
        let crossover = strategy.assess(&closes);

        // 3. Only bars past the long window's warm-up count as trades.
        let trade_indices: Vec<usize> = crossover
            .signals
            .iter()
            .enumerate()
            .skip(strategy.warmup_period())
            .filter(|(_, signal)| signal.is_trade())
            .map(|(i, _)| i)
            .collect();

        // 4. Aggregate.
        let total_trades = trade_indices.len() as u32;
        let (winning_trades, losing_trades) = placeholder_outcome(total_trades);
        let win_rate = if total_trades > 0 {
            f64::from(winning_trades) / f64::from(total_trades)
        } else {
            0.0
        };
        let total_return = win_rate * WIN_RETURN - (1.0 - win_rate) * LOSS_RETURN;

        // 5. Detail the most recent events, oldest first.
        let first_detail = trade_indices.len().saturating_sub(MAX_SIGNAL_DETAILS);
        let signals = trade_indices[first_detail..]
            .iter()
            .map(|&i| {
                let signal = crossover.signals[i];
                SignalDetail {
                    datetime: timestamps[i],
                    close_price: round_dp(closes[i], 2),
                    short_ma: round_dp(crossover.short_ma[i], 2),
                    long_ma: round_dp(crossover.long_ma[i], 2),
                    signal,
                    event_return: round_dp(event_return(signal), 4),
                }
            })
            .collect();

        PerformanceSummary {
            total_trades,
            winning_trades,
            losing_trades,
            win_rate: round_dp(win_rate, 4),
            total_return: round_dp(total_return, 4),
            signals,
        }
    }
}

/// Win/loss split of the placeholder model.
///
/// This is a fixed formula, `max(1, total / 2 + 2)` wins, unrelated to what
/// prices did after each signal. It is capped at `total_trades` so that the
/// split always adds up and the win rate stays within `[0, 1]`. Replace it with
/// a forward-return calculation before using these numbers for anything real.
fn placeholder_outcome(total_trades: u32) -> (u32, u32) {
    if total_trades == 0 {
        return (0, 0);
    }
    let winning = (total_trades / 2 + 2).max(1).min(total_trades);
    (winning, total_trades - winning)
}

/// Fixed per-event return of the placeholder model.
fn event_return(signal: Signal) -> f64 {
    match signal {
        Signal::Buy => BUY_EVENT_RETURN,
        Signal::Sell => SELL_EVENT_RETURN,
        Signal::None => 0.0,
    }
}

/// Rounds half-to-even at `dp` decimal places, working from the exact binary
/// value of `value`. Values outside `Decimal`'s range are returned unchanged.
fn round_dp(value: f64, dp: u32) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp(dp))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_split_always_adds_up() {
        for total in 0..100 {
            let (winning, losing) = placeholder_outcome(total);
            assert_eq!(winning + losing, total, "total = {total}");
            assert!(winning <= total);
        }
    }

    #[test]
    fn placeholder_split_follows_the_formula_once_it_fits() {
        assert_eq!(placeholder_outcome(0), (0, 0));
        assert_eq!(placeholder_outcome(3), (3, 0));
        assert_eq!(placeholder_outcome(5), (4, 1));
        assert_eq!(placeholder_outcome(10), (7, 3));
        assert_eq!(placeholder_outcome(49), (26, 23));
    }

    #[test]
    fn placeholder_split_is_capped_for_tiny_totals() {
        assert_eq!(placeholder_outcome(1), (1, 0));
        assert_eq!(placeholder_outcome(2), (2, 0));
    }

    #[test]
    fn event_returns_are_fixed_per_kind() {
        assert_eq!(event_return(Signal::Buy), 0.02);
        assert_eq!(event_return(Signal::Sell), -0.015);
        assert_eq!(event_return(Signal::None), 0.0);
    }

    #[test]
    fn rounds_half_to_even_on_the_binary_value() {
        assert_eq!(round_dp(101.23456, 2), 101.23);
        assert_eq!(round_dp(0.530_612_244_9, 4), 0.5306);
        // 2.675 is stored as 2.67499999..., so it rounds down.
        assert_eq!(round_dp(2.675, 2), 2.67);
        assert_eq!(round_dp(-0.08, 4), -0.08);
    }

    #[test]
    fn non_finite_values_pass_through() {
        assert!(round_dp(f64::NAN, 2).is_nan());
        assert_eq!(round_dp(f64::INFINITY, 2), f64::INFINITY);
    }
}
