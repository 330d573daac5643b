//! Time-series utilities over a single pair's candle series.
//!
//! Modules include:
//! - `forward_fill`: close gaps on a regular grid by carrying the last close
//! - `infer`: estimate the sampling cadence of an irregular series
//! - `gaps`: locate runs of missing grid points
//! - `resample`: aggregate candles to a coarser bucket
/// Gap forward-filling over a regular time grid.
pub mod forward_fill;
/// Locate missing grid points in a series.
pub mod gaps;
/// Sampling cadence inference helpers.
pub mod infer;
/// Resampling utilities for aggregating candles to coarser buckets.
pub mod resample;
/// Shared candle sanity checks and invariants.
pub mod util;
