use chrono::TimeDelta;
use rust_decimal::Decimal;

use crate::types::Candle;

/// Fill the gaps of one sorted series in place on a regular `step` grid.
///
/// Walks the grid from the first to the last existing timestamp. Every grid
/// point without a row gets a synthesised candle whose open, high, low, and
/// close all sit at the last close seen while scanning forward (real or
/// itself synthesised) with zero volume. The first grid point is the series'
/// own first row and is never synthesised. Rows that do not sit on the grid
/// are kept in timestamp order.
///
/// Re-running the fill on an already filled series is a no-op, and existing
/// rows are never altered or removed.
///
/// Returns the number of rows added. Series shorter than two rows and
/// non-positive steps are left untouched.
///
/// ```
/// use chrono::{DateTime, TimeDelta, Utc};
/// use poolside_core::{Candle, fill_series_gaps};
/// use rust_decimal::Decimal;
///
/// fn t(sec: i64) -> DateTime<Utc> { DateTime::from_timestamp(sec, 0).unwrap() }
///
/// let mut series = vec![
///     Candle::synthetic(1, t(0), Decimal::ONE),
///     Candle::synthetic(1, t(180), Decimal::TWO),
/// ];
/// let added = fill_series_gaps(&mut series, TimeDelta::seconds(60));
/// assert_eq!(added, 2);
/// assert_eq!(series[1].ts, t(60));
/// assert_eq!(series[1].close, Decimal::ONE);
/// assert_eq!(series[1].volume, Some(Decimal::ZERO));
/// ```
pub fn fill_series_gaps(series: &mut Vec<Candle>, step: TimeDelta) -> usize {
    if step <= TimeDelta::zero() || series.len() < 2 {
        return 0;
    }
    let first_ts = series[0].ts;
    let last_ts = series[series.len() - 1].ts;
    let pair_id = series[0].pair_id;

    let source = std::mem::take(series);
    let mut out = Vec::with_capacity(source.len());
    let mut rows = source.into_iter().peekable();
    let mut last_close: Option<Decimal> = None;
    let mut added = 0;

    let mut t = first_ts;
    while t <= last_ts {
        let mut have_grid_row = false;
        // Carry over every source row up to and including this grid point.
        while let Some(candle) = rows.next_if(|c| c.ts <= t) {
            have_grid_row = candle.ts == t;
            last_close = Some(candle.close);
            out.push(candle);
        }
        if !have_grid_row {
            if let Some(close) = last_close {
                out.push(Candle {
                    pair_id,
                    ts: t,
                    open: close,
                    high: close,
                    low: close,
                    close,
                    volume: Some(Decimal::ZERO),
                });
                added += 1;
            }
        }
        t = t + step;
    }
    // Off-grid rows trailing the last grid point.
    out.extend(rows);

    *series = out;
    added
}
