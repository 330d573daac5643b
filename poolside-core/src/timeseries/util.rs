//! Shared helpers for candle series sanity checks and repair.
//!
//! DEX feeds routinely carry rows damaged by MEV trades: absurd high/low
//! spikes from flash loans and oracle manipulation, open/close values far
//! from any tradeable price, and all-zero candles from broken collection
//! runs. The `ensure_*` helpers reject such rows; `fix_bad_wicks` and
//! `remove_zero_candles` repair or drop them before indexing.

use rust_decimal::Decimal;

use crate::types::{Candle, PoolsideError};

/// Ensure a single candle satisfies the OHLC price invariants.
///
/// Prices must be positive, `low` must not exceed open or close, `high` must
/// not undercut them, and volume (when present) must be non-negative.
///
/// # Errors
/// Returns `Err(PoolsideError::Data)` describing the first violated invariant.
pub fn ensure_candle_sane(c: &Candle) -> Result<(), PoolsideError> {
    if c.open <= Decimal::ZERO
        || c.high <= Decimal::ZERO
        || c.low <= Decimal::ZERO
        || c.close <= Decimal::ZERO
    {
        return Err(PoolsideError::Data(format!(
            "non-positive price on pair {} at {}",
            c.pair_id, c.ts
        )));
    }
    if c.low > c.open.min(c.close) || c.high < c.open.max(c.close) {
        return Err(PoolsideError::Data(format!(
            "broken OHLC range on pair {} at {}: open={} high={} low={} close={}",
            c.pair_id, c.ts, c.open, c.high, c.low, c.close
        )));
    }
    if let Some(v) = c.volume {
        if v < Decimal::ZERO {
            return Err(PoolsideError::Data(format!(
                "negative volume on pair {} at {}",
                c.pair_id, c.ts
            )));
        }
    }
    Ok(())
}

/// Default wick thresholds relative to close: a low below 0.1x close or a
/// high above 1.9x close is considered a manipulation artefact.
#[must_use]
pub fn default_wick_threshold() -> (Decimal, Decimal) {
    (Decimal::new(1, 1), Decimal::new(19, 1))
}

/// Default multiple of the high above which open/close values are treated
/// as broken data points. Do not apply for liquidity series.
#[must_use]
pub fn default_bad_open_close_threshold() -> Decimal {
    Decimal::from(3)
}

/// Cap manipulation-driven price spikes in place.
///
/// With `wick_threshold = Some((low, high))`, a candle high above
/// `close * high` is pulled down to the close and a low below `close * low`
/// is pulled up to it: such wicks come from flash loans and oracle attacks,
/// not from prices anyone could trade. With `bad_open_close_threshold =
/// Some(t)`, open and close values above `high * t` are clamped to the high
/// (skip this for liquidity series, where close carries TVL).
///
/// Returns the number of candles touched.
pub fn fix_bad_wicks(
    series: &mut [Candle],
    wick_threshold: Option<(Decimal, Decimal)>,
    bad_open_close_threshold: Option<Decimal>,
) -> usize {
    let mut fixed = 0;
    for c in series {
        let mut touched = false;
        if let Some((low, high)) = wick_threshold {
            if c.high > c.close * high {
                c.high = c.close;
                touched = true;
            }
            if c.low < c.close * low {
                c.low = c.close;
                touched = true;
            }
        }
        // Open cannot sit above the (possibly just repaired) high.
        if let Some(threshold) = bad_open_close_threshold {
            if c.open > c.high * threshold {
                c.open = c.high;
                touched = true;
            }
            if c.close > c.high * threshold {
                c.close = c.high;
                touched = true;
            }
        }
        if touched {
            fixed += 1;
        }
    }
    #[cfg(feature = "tracing")]
    if fixed > 0 {
        tracing::debug!(fixed, "capped bad wicks");
    }
    fixed
}

/// Drop every candle with a zero open, high, low, or close.
///
/// Zero prices come from broken collection runs and poison any downstream
/// ratio or return computation. Returns the number of candles removed.
pub fn remove_zero_candles(series: &mut Vec<Candle>) -> usize {
    let before = series.len();
    series.retain(|c| {
        c.open != Decimal::ZERO
            && c.high != Decimal::ZERO
            && c.low != Decimal::ZERO
            && c.close != Decimal::ZERO
    });
    before - series.len()
}

/// Ensure a whole series is sane: every candle passes [`ensure_candle_sane`],
/// all rows belong to one pair, and timestamps strictly increase.
///
/// # Errors
/// Returns `Err(PoolsideError::Data)` describing the first violated invariant.
pub fn ensure_series_sane(candles: &[Candle]) -> Result<(), PoolsideError> {
    let mut prev: Option<&Candle> = None;
    for c in candles {
        ensure_candle_sane(c)?;
        if let Some(p) = prev {
            if c.pair_id != p.pair_id {
                return Err(PoolsideError::Data(format!(
                    "mixed pairs in series: {} and {}",
                    p.pair_id, c.pair_id
                )));
            }
            if c.ts <= p.ts {
                return Err(PoolsideError::Data(format!(
                    "timestamps not strictly increasing on pair {} at {}",
                    c.pair_id, c.ts
                )));
            }
        }
        prev = Some(c);
    }
    Ok(())
}
