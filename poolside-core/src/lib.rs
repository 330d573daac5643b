//! poolside-core
//!
//! Candle time-series indexing and query engine for decentralised-exchange
//! trading pairs.
//!
//! - `universe`: group flat candle tables by pair and answer
//!   nearest-past-sample queries with a strict no-lookahead guarantee.
//! - `timeseries`: forward fill, cadence inference, gap detection, and
//!   resampling over a single pair's series.
//! - `liquidity`: survivorship-bias-free liquidity summarisation for
//!   trading-universe construction.
//!
//! The engine is synchronous and purely in-memory: fetching, persistence, and
//! chain monitoring live in collaborating crates that hand it already
//! materialised rows and consume its query results.
#![warn(missing_docs)]

/// Liquidity summarisation helpers for trading pair universe construction.
pub mod liquidity;
/// Time-series utilities: forward fill, step inference, gaps, resampling.
pub mod timeseries;
pub mod types;
/// The grouped candle index and its query surface.
pub mod universe;

pub use liquidity::{
    DEFAULT_TOP_SAMPLE_COUNT, LiquiditySummary, build_liquidity_summary,
    max_historical_liquidity, recent_liquidity,
};
pub use timeseries::forward_fill::fill_series_gaps;
pub use timeseries::gaps::{Gap, detect_gaps};
pub use timeseries::infer::{estimate_step, estimate_step_seconds};
pub use timeseries::resample::resample_candles;
pub use timeseries::util::{
    default_bad_open_close_threshold, default_wick_threshold, ensure_candle_sane,
    ensure_series_sane, fix_bad_wicks, remove_zero_candles,
};
pub use types::*;
pub use universe::CandleUniverse;
