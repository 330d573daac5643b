//! Re-export of foundational types from `poolside-types`.
// Consolidated re-exports so downstream crates can depend on `poolside-core` only

pub use poolside_types::{Candle, OhlcvField, PoolsideError, PrimaryKey, TimeBucket, USDollarAmount};
