use chrono::{DateTime, Utc};
use poolside_core::{Candle, TimeBucket, resample_candles};
use rust_decimal::Decimal;

fn t(sec: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(sec, 0).unwrap()
}

fn candle(sec: i64, open: i64, high: i64, low: i64, close: i64, volume: Option<i64>) -> Candle {
    Candle {
        pair_id: 1,
        ts: t(sec),
        open: Decimal::from(open),
        high: Decimal::from(high),
        low: Decimal::from(low),
        close: Decimal::from(close),
        volume: volume.map(Decimal::from),
    }
}

#[test]
fn hourly_candles_aggregate_into_daily() {
    const HOUR: i64 = 3_600;
    let rows = vec![
        candle(0, 100, 110, 95, 105, Some(10)),
        candle(HOUR, 105, 120, 104, 118, Some(20)),
        candle(2 * HOUR, 118, 119, 90, 95, Some(5)),
        // Next UTC day
        candle(86_400, 95, 96, 94, 96, Some(7)),
    ];
    let out = resample_candles(rows, TimeBucket::D1);
    assert_eq!(out.len(), 2);

    let first_day = &out[0];
    assert_eq!(first_day.ts, t(0));
    assert_eq!(first_day.open, Decimal::from(100));
    assert_eq!(first_day.high, Decimal::from(120));
    assert_eq!(first_day.low, Decimal::from(90));
    assert_eq!(first_day.close, Decimal::from(95));
    assert_eq!(first_day.volume, Some(Decimal::from(35)));

    assert_eq!(out[1].ts, t(86_400));
    assert_eq!(out[1].volume, Some(Decimal::from(7)));
}

#[test]
fn unsorted_input_is_bucketed_correctly() {
    const HOUR: i64 = 3_600;
    let rows = vec![
        candle(2 * HOUR, 118, 119, 90, 95, None),
        candle(0, 100, 110, 95, 105, None),
        candle(HOUR, 105, 120, 104, 118, None),
    ];
    let out = resample_candles(rows, TimeBucket::D1);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].open, Decimal::from(100));
    assert_eq!(out[0].close, Decimal::from(95));
}

#[test]
fn missing_volumes_stay_missing() {
    let rows = vec![
        candle(0, 1, 2, 1, 2, None),
        candle(60, 2, 3, 2, 3, None),
    ];
    let out = resample_candles(rows, TimeBucket::M5);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].volume, None);
}

#[test]
fn partial_volumes_sum_what_exists() {
    let rows = vec![
        candle(0, 1, 2, 1, 2, None),
        candle(60, 2, 3, 2, 3, Some(4)),
        candle(120, 3, 4, 3, 4, Some(6)),
    ];
    let out = resample_candles(rows, TimeBucket::M5);
    assert_eq!(out[0].volume, Some(Decimal::from(10)));
}

#[test]
fn minute_candles_aggregate_into_five_minute_buckets() {
    let rows: Vec<Candle> = (0..10)
        .map(|i| candle(i * 60, 10 + i, 11 + i, 9 + i, 10 + i, Some(1)))
        .collect();
    let out = resample_candles(rows, TimeBucket::M5);
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].ts, t(0));
    assert_eq!(out[1].ts, t(300));
    assert_eq!(out[0].open, Decimal::from(10));
    assert_eq!(out[0].close, Decimal::from(14));
    assert_eq!(out[0].high, Decimal::from(15));
    assert_eq!(out[0].volume, Some(Decimal::from(5)));
}

#[test]
fn empty_input_stays_empty() {
    assert!(resample_candles(Vec::new(), TimeBucket::D1).is_empty());
}
