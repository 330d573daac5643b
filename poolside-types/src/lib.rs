//! Poolside-specific data transfer objects shared across the poolside ecosystem.
#![warn(missing_docs)]

mod bucket;
mod candle;
mod error;

pub use bucket::TimeBucket;
pub use candle::{Candle, OhlcvField, PrimaryKey, USDollarAmount};
pub use error::PoolsideError;
