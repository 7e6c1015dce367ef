// In crates/strategies/src/sma.rs

/// Value emitted while a window does not yet have enough history.
pub const WARMUP_SENTINEL: f64 = 0.0;

/// Simple moving average over `prices`, index-aligned with the input.
///
/// Position `i` holds the arithmetic mean of `prices[i + 1 - window..=i]`, or
/// [`WARMUP_SENTINEL`] while fewer than `window` values are available. A window
/// longer than the input yields an all-sentinel series; a zero window is treated
/// the same way rather than dividing by an empty slice.
pub fn moving_average(prices: &[f64], window: usize) -> Vec<f64> {
    if window == 0 {
        return vec![WARMUP_SENTINEL; prices.len()];
    }

    let mut averages = Vec::with_capacity(prices.len());
    for i in 0..prices.len() {
        if i + 1 < window {
            averages.push(WARMUP_SENTINEL);
        } else {
            let sum: f64 = prices[i + 1 - window..=i].iter().sum();
            averages.push(sum / window as f64);
        }
    }
    averages
}
