use chrono::{DateTime, NaiveDate, Utc};
use poolside_core::{Candle, CandleUniverse, PoolsideError};
use rust_decimal::Decimal;

fn day(d: &str) -> DateTime<Utc> {
    d.parse::<NaiveDate>()
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
}

fn usd_cents(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// Hand-written candle data for one trading pair (pair_id=1).
fn synthetic_candles() -> Vec<Candle> {
    vec![
        Candle::synthetic(1, day("2020-01-01"), usd_cents(10010)),
        Candle::synthetic(1, day("2020-02-01"), usd_cents(10050)),
        Candle::synthetic(1, day("2020-03-01"), usd_cents(10110)),
        Candle::synthetic(1, day("2020-09-01"), usd_cents(10180)),
    ]
}

#[test]
fn indexing_counts_pairs_and_candles() {
    let universe = CandleUniverse::from_candles(synthetic_candles());
    assert_eq!(universe.pair_count(), 1);
    assert_eq!(universe.candle_count(), 4);
}

#[test]
fn candles_by_pair_are_addressable_by_timestamp() {
    let universe = CandleUniverse::from_candles(synthetic_candles());
    let series = universe.candles(1).unwrap();
    assert_eq!(series[0].ts, day("2020-01-01"));
    assert_eq!(series[0].open, usd_cents(10010));
    assert_eq!(series[1].ts, day("2020-02-01"));
    assert_eq!(series[1].close, usd_cents(10050));
}

#[test]
fn unsorted_rows_are_sorted_on_build() {
    let mut rows = synthetic_candles();
    rows.reverse();
    let universe = CandleUniverse::from_candles(rows);
    let series = universe.candles(1).unwrap();
    let timestamps: Vec<_> = series.iter().map(|c| c.ts).collect();
    let mut sorted = timestamps.clone();
    sorted.sort();
    assert_eq!(timestamps, sorted);
}

#[test]
fn duplicate_timestamps_keep_the_first_row() {
    let mut rows = synthetic_candles();
    rows.push(Candle::synthetic(1, day("2020-01-01"), usd_cents(99999)));
    let universe = CandleUniverse::from_candles(rows);
    assert_eq!(universe.candle_count(), 4);
    let series = universe.candles(1).unwrap();
    assert_eq!(series[0].close, usd_cents(10010));
}

#[test]
fn pairs_are_grouped_independently() {
    let mut rows = synthetic_candles();
    rows.push(Candle::synthetic(2, day("2020-01-15"), usd_cents(50000)));
    rows.push(Candle::synthetic(2, day("2020-01-16"), usd_cents(51000)));
    let universe = CandleUniverse::from_candles(rows);

    assert_eq!(universe.pair_count(), 2);
    assert_eq!(universe.candle_count(), 6);
    assert_eq!(universe.pair_ids().collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(universe.candles(1).unwrap().len(), 4);
    assert_eq!(universe.candles(2).unwrap().len(), 2);
}

#[test]
fn unknown_pair_is_not_found() {
    let universe = CandleUniverse::from_candles(synthetic_candles());
    let err = universe.candles(777).unwrap_err();
    assert!(matches!(err, PoolsideError::NotFound { .. }));
}

#[test]
fn candle_rows_round_trip_through_serde() {
    let universe = CandleUniverse::from_candles(synthetic_candles());
    let series = universe.candles(1).unwrap();
    let json = serde_json::to_string(series).unwrap();
    let restored: Vec<Candle> = serde_json::from_str(&json).unwrap();
    assert_eq!(series, restored.as_slice());

    // A reconstructed universe answers the same queries.
    let rebuilt = CandleUniverse::from_candles(restored);
    assert_eq!(rebuilt.pair_count(), 1);
    assert_eq!(rebuilt.candle_count(), 4);
}
