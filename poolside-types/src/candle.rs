use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Primary key of a trading pair as assigned by the dataset oracle.
pub type PrimaryKey = u64;

/// US dollar denominated amount (price, volume, or TVL).
pub type USDollarAmount = Decimal;

/// Which price column of a candle a lookup reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OhlcvField {
    /// Price at the bucket open.
    Open,
    /// Highest traded price within the bucket.
    High,
    /// Lowest traded price within the bucket.
    Low,
    /// Price at the bucket close.
    #[default]
    Close,
}

/// One OHLCV sample of one trading pair at one time bucket.
///
/// `ts` is the bucket start. Within a pair's indexed series timestamps are
/// unique and strictly increasing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candle {
    /// Trading pair this sample belongs to.
    pub pair_id: PrimaryKey,
    /// Bucket start timestamp.
    pub ts: DateTime<Utc>,
    /// Price at the bucket open.
    pub open: USDollarAmount,
    /// Highest traded price within the bucket.
    pub high: USDollarAmount,
    /// Lowest traded price within the bucket.
    pub low: USDollarAmount,
    /// Price at the bucket close.
    pub close: USDollarAmount,
    /// Traded volume within the bucket. `None` when the source feed does not
    /// carry volume (e.g. TVL series).
    pub volume: Option<USDollarAmount>,
}

impl Candle {
    /// Build a flat sample where open, high, low, and close all sit at `price`
    /// and no volume was traded. Used for hand-written datasets and fixtures.
    #[must_use]
    pub const fn synthetic(pair_id: PrimaryKey, ts: DateTime<Utc>, price: USDollarAmount) -> Self {
        Self {
            pair_id,
            ts,
            open: price,
            high: price,
            low: price,
            close: price,
            volume: Some(Decimal::ZERO),
        }
    }

    /// Read the requested price column.
    #[must_use]
    pub const fn price(&self, field: OhlcvField) -> USDollarAmount {
        match field {
            OhlcvField::Open => self.open,
            OhlcvField::High => self.high,
            OhlcvField::Low => self.low,
            OhlcvField::Close => self.close,
        }
    }
}
