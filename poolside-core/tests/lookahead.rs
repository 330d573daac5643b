//! Forward-looking-bias mitigation on single-pair retrieval.

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

fn one_pair_universe() -> CandleUniverse {
    CandleUniverse::from_candles(vec![
        Candle::synthetic(1, day("2020-01-01"), usd_cents(10010)),
        Candle::synthetic(1, day("2020-02-01"), usd_cents(10050)),
        Candle::synthetic(1, day("2020-03-01"), usd_cents(10110)),
        Candle::synthetic(1, day("2020-09-01"), usd_cents(10180)),
    ])
}

#[test]
fn full_series_without_cutoff() {
    let universe = one_pair_universe();
    let series = universe.single_pair_candles().unwrap();
    assert_eq!(series.len(), 4);
}

#[test]
fn cutoff_excludes_the_row_at_exactly_t() {
    let universe = one_pair_universe();
    let series = universe
        .single_pair_candles_before(day("2020-09-01"), false)
        .unwrap();
    assert_eq!(series.last().unwrap().ts, day("2020-03-01"));
}

#[test]
fn allow_current_includes_the_row_at_exactly_t() {
    let universe = one_pair_universe();
    let series = universe
        .single_pair_candles_before(day("2020-09-01"), true)
        .unwrap();
    assert_eq!(series.last().unwrap().ts, day("2020-09-01"));
}

#[test]
fn cutoff_before_first_row_yields_empty_slice() {
    let universe = one_pair_universe();
    let series = universe
        .single_pair_candles_before(day("2019-06-01"), true)
        .unwrap();
    assert!(series.is_empty());
}

#[test]
fn multi_pair_universe_requires_explicit_selection() {
    let universe = CandleUniverse::from_candles(vec![
        Candle::synthetic(1, day("2020-01-01"), usd_cents(10010)),
        Candle::synthetic(2, day("2020-01-01"), usd_cents(20020)),
    ]);
    let err = universe.single_pair_candles().unwrap_err();
    assert!(matches!(err, PoolsideError::AmbiguousPair { pair_count: 2 }));

    // Explicit selection keeps working.
    let series = universe
        .pair_candles_before(2, day("2020-06-01"), false)
        .unwrap();
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].pair_id, 2);
}

#[test]
fn empty_universe_is_not_found() {
    let universe = CandleUniverse::from_candles(Vec::new());
    let err = universe.single_pair_candles().unwrap_err();
    assert!(matches!(err, PoolsideError::NotFound { .. }));
}
