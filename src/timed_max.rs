use core::time::Duration;

use log::debug;
use num_traits::Float;

use crate::{Result, Timestamp, WindowError, WindowMax};

/// # Maximum over a Trailing Time Window
///
/// A [`WindowMax`] whose indices are time buckets of width `granularity`.
///
/// The window spans `ceil(duration / granularity)` buckets, at least one. A
/// timestamp lands in bucket `floor(unix_time / granularity)`, so with
/// whole-second granularities the bucket is `floor(unix_seconds / granularity_seconds)`.
/// Values landing in the same bucket merge, keeping the largest.
///
/// Timestamps must not move backwards across a bucket boundary; such records
/// are rejected with [`WindowError::NonMonotonicIndex`]. Jitter within one
/// bucket is harmless.
///
/// Like `WindowMax`, this type does no internal locking.
///
/// # Examples
///
/// ```
/// # use std::time::Duration;
/// # use window_max::TimedMax;
/// let mut max = TimedMax::new(Duration::from_secs(5), Duration::from_secs(1)).unwrap();
/// let start = Duration::from_secs(1_700_000_000);
///
/// max.record(start, 5.0).unwrap();
/// max.record(start + Duration::from_millis(500), 3.0).unwrap();
/// assert_eq!(max.current(), Some(5.0));
///
/// // Six seconds later the first bucket has left the window
/// max.record(start + Duration::from_secs(6), 4.0).unwrap();
/// assert_eq!(max.current(), Some(4.0));
/// ```
#[derive(Debug, Clone)]
pub struct TimedMax<T = f64> {
    max: WindowMax<T>,
    granularity: Duration,
    /// `granularity` in nanoseconds, never zero
    granularity_nanos: i128,
}

impl<T: Default + Float> TimedMax<T> {
    /// Creates a window covering `duration`, bucketed by `granularity`
    ///
    /// # Arguments
    ///
    /// * `duration` - Span of the trailing window
    /// * `granularity` - Width of a single bucket
    ///
    /// # Errors
    ///
    /// * [`WindowError::ZeroGranularity`] if `granularity` is zero
    /// * [`WindowError::CapacityOverflow`] if the bucket count does not fit in `usize`
    ///   or that many buckets can not be allocated
    pub fn new(duration: Duration, granularity: Duration) -> Result<Self> {
        if granularity.is_zero() {
            return Err(WindowError::ZeroGranularity);
        }

        let buckets = duration.as_nanos().div_ceil(granularity.as_nanos()).max(1);
        let buckets = usize::try_from(buckets).map_err(|_| WindowError::CapacityOverflow)?;
        debug!("creating timed max over {duration:?} in {buckets} buckets of {granularity:?}");

        Ok(Self {
            max: WindowMax::new(buckets)?,
            granularity,
            // Duration::MAX in nanoseconds fits comfortably in i128
            granularity_nanos: granularity.as_nanos() as i128,
        })
    }

    /// Returns the bucket `timestamp` falls into
    ///
    /// Times before the epoch round towards negative infinity, so buckets keep
    /// a constant width across the epoch.
    ///
    /// # Errors
    ///
    /// * [`WindowError::TimestampOutOfRange`] if the bucket does not fit in `i64`
    pub fn bucket_index(&self, timestamp: impl Timestamp) -> Result<i64> {
        let bucket = timestamp.unix_nanos().div_euclid(self.granularity_nanos);
        i64::try_from(bucket).map_err(|_| WindowError::TimestampOutOfRange)
    }

    /// Records `value` in the bucket of `timestamp`
    ///
    /// # Errors
    ///
    /// Everything [`bucket_index`](Self::bucket_index) and
    /// [`WindowMax::record`] report. The window is left untouched on error.
    pub fn record(&mut self, timestamp: impl Timestamp, value: T) -> Result<()> {
        let index = self.bucket_index(timestamp)?;
        self.max.record(index, value)
    }

    /// Returns the maximum value observed in the window ending at the last record
    ///
    /// Peaks only age out when a later bucket is recorded; use
    /// [`current_at`](Self::current_at) to read the window ending at a given time.
    pub fn current(&self) -> Option<T> {
        self.max.current()
    }

    /// Moves the window to `now` and returns its maximum
    ///
    /// # Errors
    ///
    /// * [`WindowError::NonMonotonicIndex`] if `now` is in a bucket before the latest one
    /// * [`WindowError::TimestampOutOfRange`] if the bucket does not fit in `i64`
    pub fn current_at(&mut self, now: impl Timestamp) -> Result<Option<T>> {
        let index = self.bucket_index(now)?;
        self.max.advance(index)?;
        Ok(self.max.current())
    }

    /// Records `value` at the current system time
    #[cfg(feature = "std")]
    pub fn record_now(&mut self, value: T) -> Result<()> {
        self.record(std::time::SystemTime::now(), value)
    }

    /// Returns the maximum over the window ending at the current system time
    #[cfg(feature = "std")]
    pub fn current_now(&mut self) -> Result<Option<T>> {
        self.current_at(std::time::SystemTime::now())
    }

    /// Returns the width of a bucket
    pub const fn granularity(&self) -> Duration {
        self.granularity
    }

    /// Returns the number of buckets the window spans
    pub const fn buckets(&self) -> usize {
        self.max.capacity()
    }

    /// Returns the underlying index window
    pub const fn window(&self) -> &WindowMax<T> {
        &self.max
    }

    /// Resets the window, keeping its duration and granularity
    pub fn reset(&mut self) -> &mut Self {
        self.max.reset();
        self
    }
}
