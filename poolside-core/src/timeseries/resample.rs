use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::types::{Candle, PrimaryKey, TimeBucket};

/// Aggregate one pair's candles into a coarser `bucket` cadence.
///
/// Groups by [`TimeBucket::floor`] of the candle timestamp and aggregates
/// OHLCV inside each bucket:
/// - open = first open of the bucket (earliest ts)
/// - high = max high
/// - low = min low
/// - close = last close of the bucket (latest ts)
/// - volume = sum of volumes, ignoring `None`; `None` if no row carried one
///
/// Output candles sit at the bucket start. Input may arrive unsorted; the
/// series is expected to hold a single pair (rows keep the first row's
/// `pair_id`).
#[must_use]
pub fn resample_candles(mut candles: Vec<Candle>, bucket: TimeBucket) -> Vec<Candle> {
    if candles.is_empty() {
        return candles;
    }
    candles.sort_by_key(|c| c.ts);

    let mut out: Vec<Candle> = Vec::new();
    let mut rows = candles.into_iter();

    let Some(first) = rows.next() else {
        return Vec::new();
    };
    let mut agg = BucketAgg::start(bucket.floor(first.ts), &first);

    for candle in rows {
        let bucket_ts = bucket.floor(candle.ts);
        if bucket_ts == agg.bucket_ts {
            agg.absorb(&candle);
        } else {
            out.push(agg.finish());
            agg = BucketAgg::start(bucket_ts, &candle);
        }
    }
    out.push(agg.finish());
    out
}

struct BucketAgg {
    bucket_ts: DateTime<Utc>,
    pair_id: PrimaryKey,
    open: Decimal,
    high: Decimal,
    low: Decimal,
    close: Decimal,
    volume: Option<Decimal>,
}

impl BucketAgg {
    fn start(bucket_ts: DateTime<Utc>, first: &Candle) -> Self {
        Self {
            bucket_ts,
            pair_id: first.pair_id,
            open: first.open,
            high: first.high,
            low: first.low,
            close: first.close,
            volume: first.volume,
        }
    }

    fn absorb(&mut self, candle: &Candle) {
        self.high = self.high.max(candle.high);
        self.low = self.low.min(candle.low);
        self.close = candle.close;
        if let Some(v) = candle.volume {
            self.volume = Some(self.volume.unwrap_or(Decimal::ZERO) + v);
        }
    }

    fn finish(self) -> Candle {
        Candle {
            pair_id: self.pair_id,
            ts: self.bucket_ts,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            volume: self.volume,
        }
    }
}
