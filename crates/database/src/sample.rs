// In crates/database/src/sample.rs

use chrono::{Duration, NaiveDate, NaiveDateTime};
use core_types::PriceBar;
use rand::Rng;

/// Price of the first generated bar.
pub const SAMPLE_BASE_PRICE: f64 = 500.0;
/// The random walk never goes below this price.
pub const SAMPLE_PRICE_FLOOR: f64 = 400.0;
const SAMPLE_BASE_VOLUME: i64 = 5_000_000;

/// Midnight of the first sample day, 2023-01-01.
pub fn sample_start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Generates `days` daily bars from a random walk seeded by the thread RNG.
pub fn generate_sample_bars(start: NaiveDateTime, days: u32) -> Vec<PriceBar> {
    generate_with(&mut rand::thread_rng(), start, days)
}

/// Generates `days` daily bars starting at `start`, one per calendar day.
///
/// Each bar opens at the current walk price; high, low and close scatter around
/// it and are clamped so that `low <= open, close <= high`. The walk then moves
/// by up to -10/+12 and is floored at [`SAMPLE_PRICE_FLOOR`].
pub fn generate_with<R: Rng>(rng: &mut R, start: NaiveDateTime, days: u32) -> Vec<PriceBar> {
    let mut base_price = SAMPLE_BASE_PRICE;
    let mut bars = Vec::with_capacity(days as usize);

    for day in 0..days {
        let open = round_cents(base_price);
        let close = round_cents(base_price + rng.gen_range(-8.0..8.0));
        let high = round_cents(base_price + rng.gen_range(5.0..15.0)).max(open).max(close);
        let low = round_cents(base_price - rng.gen_range(5.0..12.0)).min(open).min(close);

        bars.push(PriceBar {
            timestamp: start + Duration::days(i64::from(day)),
            open,
            high,
            low,
            close,
            volume: SAMPLE_BASE_VOLUME + rng.gen_range(-1_000_000..=1_000_000),
        });

        base_price = (base_price + rng.gen_range(-10.0..12.0)).max(SAMPLE_PRICE_FLOOR);
    }

    bars
}

fn round_cents(price: f64) -> f64 {
    (price * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn one_bar_per_day_in_order() {
        let bars = generate_with(&mut StdRng::seed_from_u64(7), sample_start(), 100);

        assert_eq!(bars.len(), 100);
        assert_eq!(bars[0].timestamp, sample_start());
        assert!(
            bars.windows(2)
                .all(|pair| pair[1].timestamp - pair[0].timestamp == Duration::days(1))
        );
    }

    #[test]
    fn bars_are_internally_consistent() {
        let bars = generate_with(&mut StdRng::seed_from_u64(42), sample_start(), 250);

        for bar in &bars {
            assert!(bar.low <= bar.open && bar.open <= bar.high, "{bar:?}");
            assert!(bar.low <= bar.close && bar.close <= bar.high, "{bar:?}");
            assert!(bar.open >= SAMPLE_PRICE_FLOOR, "{bar:?}");
            assert!((4_000_000..=6_000_000).contains(&bar.volume), "{bar:?}");
        }
        assert_eq!(bars[0].open, SAMPLE_BASE_PRICE);
    }

    #[test]
    fn zero_days_is_empty() {
        assert!(generate_sample_bars(sample_start(), 0).is_empty());
    }
}
