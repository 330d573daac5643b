use std::collections::BTreeMap;

use chrono::TimeDelta;

use crate::types::Candle;

/// Estimate a representative sampling step (in seconds) from positive
/// adjacent timestamp deltas in the series.
///
/// Prefer the mode (most frequent positive delta); if there is no unique
/// mode, return the lower median so the answer is always an actually
/// observed cadence. Input order does not matter and duplicate timestamps
/// are ignored. Returns `None` with fewer than two distinct timestamps.
///
/// ```
/// use chrono::DateTime;
/// use poolside_core::{Candle, estimate_step_seconds};
/// use rust_decimal::Decimal;
///
/// let mk = |sec: i64| {
///     Candle::synthetic(1, DateTime::from_timestamp(sec, 0).unwrap(), Decimal::ONE)
/// };
/// // Adjacent deltas 60, 60, 60, 120, 180 => unique mode 60
/// let series = vec![mk(0), mk(60), mk(120), mk(180), mk(300), mk(480)];
/// assert_eq!(estimate_step_seconds(&series), Some(60));
/// ```
#[must_use]
pub fn estimate_step_seconds(candles: &[Candle]) -> Option<i64> {
    if candles.len() < 2 {
        return None;
    }
    let mut timestamps: Vec<_> = candles.iter().map(|c| c.ts).collect();
    timestamps.sort_unstable();

    let mut deltas: Vec<i64> = Vec::with_capacity(timestamps.len() - 1);
    let mut last = timestamps[0];
    for &ts in &timestamps[1..] {
        let dt: TimeDelta = ts - last;
        if dt > TimeDelta::zero() {
            deltas.push(dt.num_seconds());
            last = ts;
        }
    }
    if deltas.is_empty() {
        return None;
    }

    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for &d in &deltas {
        *counts.entry(d).or_insert(0) += 1;
    }
    let best_count = counts.values().copied().max().unwrap_or(0);
    let mut modes = counts
        .iter()
        .filter(|&(_, &count)| count == best_count)
        .map(|(&delta, _)| delta);
    let first_mode = modes.next();
    if let (Some(mode), None) = (first_mode, modes.next()) {
        return Some(mode);
    }

    // No unique mode: lower median of the observed deltas.
    deltas.sort_unstable();
    let mid = deltas.len() / 2;
    if deltas.len() % 2 == 1 {
        Some(deltas[mid])
    } else {
        Some(deltas[mid - 1])
    }
}

/// Estimated sampling step as a `TimeDelta`. See [`estimate_step_seconds`].
#[must_use]
pub fn estimate_step(candles: &[Candle]) -> Option<TimeDelta> {
    estimate_step_seconds(candles).map(TimeDelta::seconds)
}
