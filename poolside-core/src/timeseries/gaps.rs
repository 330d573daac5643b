use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

use crate::timeseries::infer::estimate_step;
use crate::types::{Candle, PoolsideError};

/// A contiguous run of missing grid points inside a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Gap {
    /// First missing grid point.
    pub start: DateTime<Utc>,
    /// Last missing grid point.
    pub end: DateTime<Utc>,
    /// Number of missing grid points in the run.
    pub missing: usize,
}

/// Locate runs of missing grid points between the first and last timestamp
/// of a sorted series.
///
/// When `step` is `None` the cadence is inferred from the data itself
/// (mode of adjacent deltas). A series that covers its whole grid yields an
/// empty vector, as does a series shorter than two rows.
///
/// # Errors
/// - `Err(PoolsideError::InvalidArg)` for a non-positive `step`.
/// - `Err(PoolsideError::Data)` if no cadence could be inferred from the
///   series (all timestamps identical).
pub fn detect_gaps(
    candles: &[Candle],
    step: Option<TimeDelta>,
) -> Result<Vec<Gap>, PoolsideError> {
    if candles.len() < 2 {
        return Ok(Vec::new());
    }
    let step = match step {
        Some(s) if s > TimeDelta::zero() => s,
        Some(s) => {
            return Err(PoolsideError::InvalidArg(format!(
                "gap detection step must be positive, got {s}"
            )));
        }
        None => estimate_step(candles)
            .ok_or_else(|| PoolsideError::Data("could not infer series cadence".into()))?,
    };

    let last_ts = candles[candles.len() - 1].ts;
    let mut gaps = Vec::new();
    let mut run_start: Option<DateTime<Utc>> = None;
    let mut run_len = 0;
    let mut i = 0;

    let mut t = candles[0].ts;
    while t <= last_ts {
        while i < candles.len() && candles[i].ts < t {
            i += 1;
        }
        let present = i < candles.len() && candles[i].ts == t;
        if present {
            if let Some(start) = run_start.take() {
                gaps.push(Gap {
                    start,
                    end: t - step,
                    missing: run_len,
                });
                run_len = 0;
            }
        } else {
            if run_start.is_none() {
                run_start = Some(t);
            }
            run_len += 1;
        }
        t = t + step;
    }
    if let Some(start) = run_start {
        gaps.push(Gap {
            start,
            end: t - step,
            missing: run_len,
        });
    }
    Ok(gaps)
}
