//! Grouped candle index over multiple trading pairs.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use chrono::{DateTime, TimeDelta, Utc};

use crate::timeseries::forward_fill::fill_series_gaps;
use crate::types::{Candle, OhlcvField, PoolsideError, PrimaryKey, TimeBucket, USDollarAmount};

/// A collection of candles for one or more trading pairs, indexed for
/// per-pair timestamp lookup.
///
/// Construction partitions a flat row table by `pair_id` and sorts each
/// partition ascending by timestamp; every query thereafter is a binary
/// search over the pair's owned series. The pair set is fixed at
/// construction. [`CandleUniverse::forward_fill`] is the only mutation and it
/// only appends synthesised rows.
///
/// ```
/// use chrono::{DateTime, TimeDelta, Utc};
/// use poolside_core::{Candle, CandleUniverse};
/// use rust_decimal::Decimal;
///
/// fn t(sec: i64) -> DateTime<Utc> { DateTime::from_timestamp(sec, 0).unwrap() }
///
/// let universe = CandleUniverse::from_candles(vec![
///     Candle::synthetic(1, t(0), Decimal::new(10010, 2)),
///     Candle::synthetic(1, t(86_400), Decimal::new(10050, 2)),
/// ]);
/// let (price, distance) = universe
///     .price_with_tolerance(1, t(90_000), TimeDelta::hours(2))
///     .unwrap();
/// assert_eq!(price, Decimal::new(10050, 2));
/// assert_eq!(distance, TimeDelta::seconds(3_600));
/// ```
#[derive(Debug, Clone)]
pub struct CandleUniverse {
    pairs: BTreeMap<PrimaryKey, Vec<Candle>>,
}

impl CandleUniverse {
    /// Build the index from a flat table of candle rows.
    ///
    /// Rows may arrive in any order. Within a pair, duplicate timestamps are
    /// dropped with first-row-wins semantics.
    #[must_use]
    pub fn from_candles<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = Candle>,
    {
        let mut grouped: BTreeMap<PrimaryKey, BTreeMap<DateTime<Utc>, Candle>> = BTreeMap::new();
        for candle in rows {
            match grouped.entry(candle.pair_id).or_default().entry(candle.ts) {
                Entry::Vacant(v) => {
                    v.insert(candle);
                }
                Entry::Occupied(_) => {}
            }
        }
        let pairs: BTreeMap<PrimaryKey, Vec<Candle>> = grouped
            .into_iter()
            .map(|(pair_id, by_ts)| (pair_id, by_ts.into_values().collect()))
            .collect();
        #[cfg(feature = "tracing")]
        tracing::debug!(
            pairs = pairs.len(),
            candles = pairs.values().map(Vec::len).sum::<usize>(),
            "indexed candle universe"
        );
        Self { pairs }
    }

    /// Number of distinct pairs in the universe.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    /// Total number of candles across all pairs.
    #[must_use]
    pub fn candle_count(&self) -> usize {
        self.pairs.values().map(Vec::len).sum()
    }

    /// Pair ids present in the universe, in ascending order.
    pub fn pair_ids(&self) -> impl Iterator<Item = PrimaryKey> + '_ {
        self.pairs.keys().copied()
    }

    /// The full ordered series of one pair.
    ///
    /// # Errors
    /// Returns `Err(PoolsideError::NotFound)` if the pair is absent.
    pub fn candles(&self, pair_id: PrimaryKey) -> Result<&[Candle], PoolsideError> {
        self.pairs
            .get(&pair_id)
            .map(Vec::as_slice)
            .ok_or_else(|| PoolsideError::not_found(format!("candles for pair {pair_id}")))
    }

    /// Closing price of the most recent sample at or before `when`, together
    /// with its distance from `when`.
    ///
    /// Shorthand for [`CandleUniverse::value_with_tolerance`] on
    /// [`OhlcvField::Close`].
    ///
    /// # Errors
    /// See [`CandleUniverse::value_with_tolerance`].
    pub fn price_with_tolerance(
        &self,
        pair_id: PrimaryKey,
        when: DateTime<Utc>,
        tolerance: TimeDelta,
    ) -> Result<(USDollarAmount, TimeDelta), PoolsideError> {
        self.value_with_tolerance(pair_id, when, tolerance, OhlcvField::Close)
    }

    /// Value of `field` on the most recent sample at or before `when`.
    ///
    /// Samples dated after `when` are never considered: a backtest asking
    /// "what did I know at time T" must not observe the future. An exact
    /// timestamp match returns a zero distance.
    ///
    /// # Errors
    /// - `Err(PoolsideError::NotFound)` if the pair is absent.
    /// - `Err(PoolsideError::CandleSampleUnavailable)` if the pair has no
    ///   sample at or before `when`, or the nearest one is further away than
    ///   `tolerance`.
    pub fn value_with_tolerance(
        &self,
        pair_id: PrimaryKey,
        when: DateTime<Utc>,
        tolerance: TimeDelta,
        field: OhlcvField,
    ) -> Result<(USDollarAmount, TimeDelta), PoolsideError> {
        let series = self.candles(pair_id)?;
        let at_or_before = series.partition_point(|c| c.ts <= when);
        let candle = at_or_before
            .checked_sub(1)
            .and_then(|i| series.get(i))
            .ok_or(PoolsideError::sample_unavailable(pair_id, when, tolerance))?;
        let distance = when - candle.ts;
        if distance > tolerance {
            return Err(PoolsideError::sample_unavailable(pair_id, when, tolerance));
        }
        Ok((candle.price(field), distance))
    }

    /// The full series of the universe's only pair.
    ///
    /// # Errors
    /// - `Err(PoolsideError::AmbiguousPair)` if the universe holds more than
    ///   one pair; use the pair-explicit accessors instead.
    /// - `Err(PoolsideError::NotFound)` if the universe is empty.
    pub fn single_pair_candles(&self) -> Result<&[Candle], PoolsideError> {
        self.candles(self.only_pair_id()?)
    }

    /// Candles of the universe's only pair visible as of `cutoff`.
    ///
    /// With `allow_current` false (the default stance for backtesting), the
    /// row dated exactly `cutoff` is excluded: a decision made at T may use
    /// strictly older data only. With `allow_current` true the row at
    /// `cutoff` is included.
    ///
    /// # Errors
    /// Same conditions as [`CandleUniverse::single_pair_candles`].
    pub fn single_pair_candles_before(
        &self,
        cutoff: DateTime<Utc>,
        allow_current: bool,
    ) -> Result<&[Candle], PoolsideError> {
        self.pair_candles_before(self.only_pair_id()?, cutoff, allow_current)
    }

    /// Candles of an explicitly selected pair visible as of `cutoff`.
    ///
    /// # Errors
    /// Returns `Err(PoolsideError::NotFound)` if the pair is absent.
    pub fn pair_candles_before(
        &self,
        pair_id: PrimaryKey,
        cutoff: DateTime<Utc>,
        allow_current: bool,
    ) -> Result<&[Candle], PoolsideError> {
        let series = self.candles(pair_id)?;
        let end = if allow_current {
            series.partition_point(|c| c.ts <= cutoff)
        } else {
            series.partition_point(|c| c.ts < cutoff)
        };
        Ok(&series[..end])
    }

    /// Close every gap in every pair's series on the `bucket` grid.
    ///
    /// For each pair, walks the regular grid from the series' first timestamp
    /// to its last and synthesises a flat zero-volume candle at the last
    /// known close for every missing grid point. Existing rows are never
    /// altered or removed, and re-running the fill adds nothing.
    ///
    /// Returns the number of synthesised rows.
    pub fn forward_fill(&mut self, bucket: TimeBucket) -> usize {
        let step = bucket.duration();
        let added: usize = self
            .pairs
            .values_mut()
            .map(|series| fill_series_gaps(series, step))
            .sum();
        #[cfg(feature = "tracing")]
        tracing::debug!(bucket = %bucket, added, "forward filled candle universe");
        added
    }

    fn only_pair_id(&self) -> Result<PrimaryKey, PoolsideError> {
        let mut ids = self.pairs.keys();
        match (ids.next(), ids.next()) {
            (Some(&id), None) => Ok(id),
            (None, _) => Err(PoolsideError::not_found("candles in an empty universe")),
            (Some(_), Some(_)) => Err(PoolsideError::AmbiguousPair {
                pair_count: self.pairs.len(),
            }),
        }
    }
}
