//! Liquidity summarisation for survivorship-bias-free universe construction.
//!
//! Operates on a [`CandleUniverse`] whose candle `close` carries the pair's
//! liquidity/TVL value. Unlike the strict tolerance lookups on the universe
//! itself, every helper here degrades to zero on missing or sparse data: the
//! output feeds pair filtering, where an absent pair simply fails the filter.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::{PrimaryKey, TimeBucket, USDollarAmount};
use crate::universe::CandleUniverse;

/// How many of a pair's largest liquidity samples feed the historical
/// maximum. Taking the minimum of the top set damps single-sample spikes
/// (flash loans, launch-day pricing glitches) without losing long-dead pairs.
pub const DEFAULT_TOP_SAMPLE_COUNT: usize = 10;

/// Liquidity above this many US dollars on a single DEX pair is assumed to be
/// broken data, not real depth.
const BROKEN_LIQUIDITY_USD: i64 = 100_000_000;

/// Historical-maximum and recent liquidity per pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LiquiditySummary {
    /// Minimum of the pair's top historical liquidity samples.
    pub max_historical: BTreeMap<PrimaryKey, USDollarAmount>,
    /// Liquidity close at `now - delay`, floored to the bucket grid.
    pub recent: BTreeMap<PrimaryKey, USDollarAmount>,
}

/// Summarise historical-maximum and recent liquidity for a set of pairs.
///
/// `delay` pushes the "recent" probe back in time to stay clear of indexer
/// lag at the head of the feed; `now` is explicit so the caller controls the
/// clock. The liquidity universe must be forward filled if exact-bucket
/// recent lookups are expected to hit.
#[must_use]
pub fn build_liquidity_summary<I>(
    universe: &CandleUniverse,
    pair_ids: I,
    now: DateTime<Utc>,
    delay: TimeDelta,
    bucket: TimeBucket,
) -> LiquiditySummary
where
    I: IntoIterator<Item = PrimaryKey>,
{
    let mut summary = LiquiditySummary::default();
    for pair_id in pair_ids {
        summary.max_historical.insert(
            pair_id,
            max_historical_liquidity(universe, pair_id, DEFAULT_TOP_SAMPLE_COUNT),
        );
        summary
            .recent
            .insert(pair_id, recent_liquidity(universe, pair_id, now, delay, bucket));
    }
    summary
}

/// Historical maximum liquidity of a pair, damped against outliers.
///
/// Takes the pair's `samples` largest liquidity closes and returns the
/// minimum of that top set. Values above the implausible-data ceiling are
/// treated as broken and reported as zero, as is a missing or empty pair.
#[must_use]
pub fn max_historical_liquidity(
    universe: &CandleUniverse,
    pair_id: PrimaryKey,
    samples: usize,
) -> USDollarAmount {
    let Ok(series) = universe.candles(pair_id) else {
        return Decimal::ZERO;
    };
    if series.is_empty() || samples == 0 {
        return Decimal::ZERO;
    }
    let mut closes: Vec<Decimal> = series.iter().map(|c| c.close).collect();
    closes.sort_unstable_by(|a, b| b.cmp(a));
    closes.truncate(samples);
    let damped = closes[closes.len() - 1];
    if damped > Decimal::from(BROKEN_LIQUIDITY_USD) {
        return Decimal::ZERO;
    }
    damped
}

/// Liquidity of a pair as of `now - delay`, floored to the bucket grid.
///
/// Returns zero when the pair or the bucket sample is missing.
#[must_use]
pub fn recent_liquidity(
    universe: &CandleUniverse,
    pair_id: PrimaryKey,
    now: DateTime<Utc>,
    delay: TimeDelta,
    bucket: TimeBucket,
) -> USDollarAmount {
    let Ok(series) = universe.candles(pair_id) else {
        return Decimal::ZERO;
    };
    let probe = bucket.floor(now - delay);
    series
        .binary_search_by_key(&probe, |c| c.ts)
        .map(|i| series[i].close)
        .unwrap_or(Decimal::ZERO)
}
