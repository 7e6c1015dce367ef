use analytics::AnalyticsEngine;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use core_types::{PriceBar, PriceSeries, Signal};
use strategies::MACrossoverSettings;

fn day(offset: usize) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        + Duration::days(offset as i64)
}

fn series_from_closes(closes: &[f64]) -> PriceSeries {
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PriceBar {
            timestamp: day(i),
            open: close - 1.0,
            high: close + 1.0,
            low: close - 2.0,
            close,
            volume: 1_000_000,
        })
        .collect();
    PriceSeries::new(bars).unwrap()
}

/// 4 bars at 110 then 4 at 90, repeated.
fn square_wave(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| if (i / 4) % 2 == 0 { 110.0 } else { 90.0 })
        .collect()
}

/// Falls 2.0 per bar for 15 bars, then rises 2.0 per bar for 15 bars.
fn v_shape() -> Vec<f64> {
    (0..15)
        .map(|i| 130.0 - f64::from(i) * 2.0)
        .chain((0..15).map(|i| 102.0 + f64::from(i) * 2.0))
        .collect()
}

fn assert_near(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn short_history_yields_an_empty_summary() {
    let series = series_from_closes(&[100.5; 10]);
    let summary = AnalyticsEngine::new().evaluate(&series, &MACrossoverSettings::new(5, 20));

    assert_eq!(summary.total_trades, 0);
    assert_eq!(summary.winning_trades, 0);
    assert_eq!(summary.losing_trades, 0);
    assert_eq!(summary.win_rate, 0.0);
    assert_eq!(summary.total_return, 0.0);
    assert!(summary.signals.is_empty());
}

#[test]
fn empty_series_yields_an_empty_summary() {
    let summary = AnalyticsEngine::new()
        .evaluate(&PriceSeries::default(), &MACrossoverSettings::new(5, 20));
    assert_eq!(summary.total_trades, 0);
    assert!(summary.signals.is_empty());
}

#[test]
fn steadily_rising_series_never_crosses() {
    let closes: Vec<f64> = (0..50).map(|i| 101.0 + f64::from(i) * 0.5).collect();
    let summary =
        AnalyticsEngine::new().evaluate(&series_from_closes(&closes), &MACrossoverSettings::new(5, 20));

    assert_eq!(
        summary.total_trades,
        summary.winning_trades + summary.losing_trades
    );
    assert!((0.0..=1.0).contains(&summary.win_rate));
    assert_eq!(summary.total_trades, 0);
    // The return formula still applies with a zero win rate.
    assert_near(summary.total_return, -0.08);
    assert!(summary.signals.is_empty());
}

#[test]
fn exactly_long_window_bars_is_enough_to_evaluate() {
    // The first bar with a long average is a death cross against the sentinel.
    let closes = [10.0, 9.0, 8.0, 7.0, 6.0];
    let summary =
        AnalyticsEngine::new().evaluate(&series_from_closes(&closes), &MACrossoverSettings::new(2, 5));

    assert_eq!(summary.total_trades, 1);
    assert_eq!(summary.signals.len(), 1);
    assert_eq!(summary.signals[0].signal, Signal::Sell);
    assert_eq!(summary.signals[0].datetime, day(4));
}

#[test]
fn reports_both_crosses_of_a_v_shaped_market() {
    let summary =
        AnalyticsEngine::new().evaluate(&series_from_closes(&v_shape()), &MACrossoverSettings::new(3, 6));

    assert_eq!(summary.total_trades, 2);
    assert_eq!(summary.winning_trades, 2);
    assert_eq!(summary.losing_trades, 0);
    assert_near(summary.win_rate, 1.0);
    assert_near(summary.total_return, 0.15);

    let sell = &summary.signals[0];
    assert_eq!(sell.signal, Signal::Sell);
    assert_eq!(sell.datetime, day(5));
    assert_near(sell.close_price, 120.0);
    assert_near(sell.short_ma, 122.0);
    assert_near(sell.long_ma, 125.0);
    assert_near(sell.event_return, -0.015);

    let buy = &summary.signals[1];
    assert_eq!(buy.signal, Signal::Buy);
    assert_eq!(buy.datetime, day(18));
    assert_near(buy.close_price, 108.0);
    assert_near(buy.short_ma, 106.0);
    assert_near(buy.long_ma, 104.33);
    assert_near(buy.event_return, 0.02);
}

#[test]
fn detail_list_keeps_only_the_ten_most_recent_events() {
    let summary = AnalyticsEngine::new()
        .evaluate(&series_from_closes(&square_wave(200)), &MACrossoverSettings::new(2, 6));

    assert_eq!(summary.total_trades, 49);
    assert_eq!(summary.winning_trades, 26);
    assert_eq!(summary.losing_trades, 23);
    assert_near(summary.win_rate, 0.5306);
    assert_near(summary.total_return, 0.042);

    assert_eq!(summary.signals.len(), 10);
    assert!(
        summary
            .signals
            .windows(2)
            .all(|pair| pair[0].datetime < pair[1].datetime)
    );
    assert!(summary.signals.iter().all(|detail| detail.signal.is_trade()));

    assert_eq!(summary.signals[0].datetime, day(160));
    assert_eq!(summary.signals[0].signal, Signal::Buy);
    let last = summary.signals.last().unwrap();
    assert_eq!(last.datetime, day(196));
    assert_eq!(last.signal, Signal::Sell);
    assert_near(last.close_price, 90.0);
    assert_near(last.short_ma, 100.0);
    assert_near(last.long_ma, 103.33);
}

#[test]
fn detail_list_is_as_long_as_the_trade_count_when_short() {
    for len in [30, 45, 60, 120, 200] {
        let summary = AnalyticsEngine::new()
            .evaluate(&series_from_closes(&square_wave(len)), &MACrossoverSettings::new(2, 6));
        assert_eq!(
            summary.signals.len(),
            (summary.total_trades as usize).min(10),
            "len = {len}"
        );
        assert_eq!(
            summary.total_trades,
            summary.winning_trades + summary.losing_trades
        );
        assert!((0.0..=1.0).contains(&summary.win_rate));
    }
}

#[test]
fn inverted_windows_degrade_without_panicking() {
    let summary = AnalyticsEngine::new()
        .evaluate(&series_from_closes(&square_wave(40)), &MACrossoverSettings::new(6, 2));
    assert_eq!(
        summary.total_trades,
        summary.winning_trades + summary.losing_trades
    );
}

#[test]
fn summary_serializes_with_the_api_field_names() {
    let summary =
        AnalyticsEngine::new().evaluate(&series_from_closes(&v_shape()), &MACrossoverSettings::new(3, 6));
    let json = serde_json::to_value(&summary).unwrap();

    assert_eq!(json["total_trades"], 2);
    assert_eq!(json["signals"][0]["signal"], "SELL");
    assert_eq!(json["signals"][0]["return"], -0.015);
    assert_eq!(json["signals"][0]["datetime"], "2023-01-06T00:00:00");
}
