use chrono::{DateTime, TimeDelta, Utc};
use thiserror::Error;

use crate::candle::PrimaryKey;

/// Unified error type for the poolside workspace.
///
/// All errors are data-availability conditions over already-loaded, in-memory
/// tables; none are transient, so nothing here is worth retrying.
#[derive(Debug, Error)]
pub enum PoolsideError {
    /// A pair or other resource could not be found in the dataset.
    #[error("not found: {what}")]
    NotFound {
        /// Description of the missing resource, e.g. "candles for pair 42".
        what: String,
    },

    /// No sample close enough in time exists for a tolerance lookup.
    ///
    /// The caller must not silently fall back to stale data; it decides
    /// whether to widen the tolerance or skip the pair.
    #[error("no candle for pair {pair_id} at or before {when} within {tolerance}")]
    CandleSampleUnavailable {
        /// Pair that was queried.
        pair_id: PrimaryKey,
        /// Timestamp the caller asked about.
        when: DateTime<Utc>,
        /// Maximum accepted distance to the nearest past sample.
        tolerance: TimeDelta,
    },

    /// A single-pair operation was invoked on a universe holding several
    /// pairs without selecting one.
    #[error("universe holds {pair_count} pairs; select one explicitly")]
    AmbiguousPair {
        /// Number of pairs in the universe.
        pair_count: usize,
    },

    /// Issues with the loaded data itself (broken OHLC invariants, etc.).
    #[error("data issue: {0}")]
    Data(String),

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),
}

impl PoolsideError {
    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build a `CandleSampleUnavailable` error for a failed tolerance lookup.
    #[must_use]
    pub const fn sample_unavailable(
        pair_id: PrimaryKey,
        when: DateTime<Utc>,
        tolerance: TimeDelta,
    ) -> Self {
        Self::CandleSampleUnavailable {
            pair_id,
            when,
            tolerance,
        }
    }
}
