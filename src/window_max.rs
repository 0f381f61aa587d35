use log::{debug, trace, warn};
use num_traits::Float;

use crate::{Entry, Result, WindowError, utils::MonotonicQueue};

/// # Sliding-Window Maximum over an Index Stream
///
/// Tracks the maximum of every value recorded within the last `capacity` index
/// units of a non-decreasing index stream.
///
/// Uses the ascending-minima technique, adapted for maxima, over a circular
/// buffer allocated once at construction. Each recorded value is appended once
/// and evicted at most once, so [`record`](Self::record) is amortized O(1) and
/// [`current`](Self::current) is O(1). No allocation happens after `new`.
///
/// An entry recorded at index `j` stays in the window while `i - j < capacity`,
/// where `i` is the greatest index submitted so far.
///
/// `WindowMax` does no internal locking. Mutation takes `&mut self`; wrap the
/// tracker in a mutex, or shard trackers by key, when several threads feed it.
///
/// # Examples
///
/// ```
/// # use window_max::WindowMax;
/// let mut max = WindowMax::new(5).unwrap();
/// let values = [5.0, 6.0, 5.0, 5.0, 5.0, 5.0, 5.0];
/// let mut results = vec![];
///
/// for (i, v) in values.into_iter().enumerate() {
///     max.record(i as i64, v).unwrap();
///     results.extend(max.current());
/// }
///
/// assert_eq!(results, [5.0, 6.0, 6.0, 6.0, 6.0, 6.0, 5.0]);
/// ```
#[derive(Debug, Clone)]
pub struct WindowMax<T = f64> {
    queue: MonotonicQueue<T>,
    /// Greatest index submitted so far
    horizon: Option<i64>,
}

impl<T: Default + Float> WindowMax<T> {
    /// Creates a new window spanning `capacity` index units
    ///
    /// # Arguments
    ///
    /// * `capacity` - Width of the trailing window, at least 1
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The window
    ///
    /// # Errors
    ///
    /// * [`WindowError::ZeroCapacity`] if `capacity` is zero
    /// * [`WindowError::CapacityOverflow`] if `capacity` entries can not be allocated
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(WindowError::ZeroCapacity);
        }
        debug!("creating window max with capacity {capacity}");
        let queue = MonotonicQueue::new(capacity).map_err(|err| {
            warn!("can not allocate window of {capacity} entries: {err}");
            WindowError::CapacityOverflow
        })?;
        Ok(Self {
            queue,
            horizon: None,
        })
    }

    /// Records `value` at `index`
    ///
    /// Drops every retained value the new one dominates, ages out entries that
    /// are `capacity` or more units behind `index`, then retains the new value.
    /// A value equal to a retained one replaces it.
    ///
    /// # Arguments
    ///
    /// * `index` - Position in the stream, not below any index submitted before
    /// * `value` - The observed value
    ///
    /// # Errors
    ///
    /// * [`WindowError::NonMonotonicIndex`] if `index` is behind [`horizon`](Self::horizon)
    /// * [`WindowError::NanValue`] if `value` is NaN
    ///
    /// The window is left untouched on error.
    pub fn record(&mut self, index: i64, value: T) -> Result<()> {
        if value.is_nan() {
            warn!("rejecting NaN recorded at index {index}");
            return Err(WindowError::NanValue);
        }
        self.check_index(index)?;
        self.queue.push(index, value);
        self.horizon = Some(index);
        Ok(())
    }

    /// Moves the window forward to `index` without recording a value
    ///
    /// Entries that are `capacity` or more units behind `index` are dropped, so
    /// the window may become empty. Useful when observations stop arriving but
    /// old peaks should still age out.
    ///
    /// # Errors
    ///
    /// * [`WindowError::NonMonotonicIndex`] if `index` is behind [`horizon`](Self::horizon)
    pub fn advance(&mut self, index: i64) -> Result<()> {
        self.check_index(index)?;
        trace!("advancing window horizon to {index}");
        self.queue.remove_expired_elements(index);
        self.horizon = Some(index);
        Ok(())
    }

    fn check_index(&self, index: i64) -> Result<()> {
        match self.horizon {
            Some(previous) if index < previous => {
                warn!("rejecting index {index} behind window horizon {previous}");
                Err(WindowError::NonMonotonicIndex { previous, index })
            }
            _ => Ok(()),
        }
    }

    /// Returns the maximum value within the window
    ///
    /// # Returns
    ///
    /// * `Option<T>` - The maximum, or `None` if the window holds no entries
    pub fn current(&self) -> Option<T> {
        self.queue.front()
    }

    /// Returns the width of the window in index units
    pub const fn capacity(&self) -> usize {
        self.queue.capacity()
    }

    /// Returns the number of retained entries
    pub const fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns true if no entries are retained
    pub const fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns the greatest index submitted so far, if any
    pub const fn horizon(&self) -> Option<i64> {
        self.horizon
    }

    /// Returns the retained entries, oldest first
    ///
    /// Indices ascend strictly and values never increase along the iterator,
    /// so the first entry is the window maximum.
    pub fn entries(&self) -> impl Iterator<Item = &Entry<T>> {
        self.queue.iter()
    }

    /// Resets the window, keeping its capacity
    pub fn reset(&mut self) -> &mut Self {
        self.queue.reset();
        self.horizon = None;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::all)]
mod tests {
    use super::*;

    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn currents(capacity: usize, indices: &[i64], values: &[f64]) -> Vec<f64> {
        let mut max = WindowMax::new(capacity).unwrap();
        indices
            .iter()
            .zip(values)
            .map(|(&i, &v)| {
                max.record(i, v).unwrap();
                max.current().unwrap()
            })
            .collect()
    }

    fn sequential(values: &[f64]) -> Vec<f64> {
        let indices: Vec<i64> = (0..values.len() as i64).collect();
        currents(5, &indices, values)
    }

    fn assert_ordered(max: &WindowMax<f64>) {
        let entries: Vec<_> = max.entries().copied().collect();
        for pair in entries.windows(2) {
            assert!(pair[0].index < pair[1].index, "indices not ascending");
            assert!(pair[0].value >= pair[1].value, "values not descending");
        }
        assert!(max.len() <= max.capacity());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert_eq!(
            WindowMax::<f64>::new(0).unwrap_err(),
            WindowError::ZeroCapacity
        );
    }

    #[test]
    fn test_unallocatable_capacity_rejected() {
        assert_eq!(
            WindowMax::<f64>::new(usize::MAX / 8).unwrap_err(),
            WindowError::CapacityOverflow
        );
    }

    #[test]
    fn test_empty_window_has_no_current() {
        let max = WindowMax::<f64>::new(3).unwrap();
        assert_eq!(max.current(), None);
        assert!(max.is_empty());
        assert_eq!(max.horizon(), None);
    }

    #[test]
    fn test_small_sequences() {
        assert_eq!(sequential(&[1.0]), [1.0]);
        assert_eq!(sequential(&[1.0, 2.0]), [1.0, 2.0]);
        assert_eq!(sequential(&[2.0, 1.0]), [2.0, 2.0]);
        assert_eq!(sequential(&[1.0, 2.0, 1.0]), [1.0, 2.0, 2.0]);
    }

    #[test]
    fn test_windowing_out() {
        assert_eq!(
            sequential(&[5.0, 6.0, 5.0, 5.0, 5.0, 5.0, 5.0]),
            [5.0, 6.0, 6.0, 6.0, 6.0, 6.0, 5.0]
        );
        assert_eq!(
            sequential(&[5.0, 6.0, 5.0, 7.0, 5.0, 5.0, 1.0]),
            [5.0, 6.0, 6.0, 7.0, 7.0, 7.0, 7.0]
        );
        assert_eq!(
            sequential(&[5.0, 8.0, 5.0, 7.0, 5.0, 5.0, 1.0, 4.0, 4.0, 4.0, 4.0]),
            [5.0, 8.0, 8.0, 8.0, 8.0, 8.0, 7.0, 7.0, 5.0, 5.0, 4.0]
        );
        assert_eq!(
            sequential(&[
                5.0, 8.0, 5.0, 7.0, 5.0, 5.0, 1.0, 4.0, 4.0, 4.0, 4.0, 9.0, 3.0, 4.0, 2.0, 1.0,
                0.0
            ]),
            [
                5.0, 8.0, 8.0, 8.0, 8.0, 8.0, 7.0, 7.0, 5.0, 5.0, 4.0, 9.0, 9.0, 9.0, 9.0, 9.0,
                4.0
            ]
        );
    }

    #[test]
    fn test_windowing_out_with_gaps() {
        assert_eq!(
            currents(5, &[0, 1, 2, 6], &[6.0, 5.0, 2.0, 1.0]),
            [6.0, 6.0, 6.0, 2.0]
        );
    }

    #[test]
    fn test_repeated_index_merges_bucket() {
        assert_eq!(
            currents(3, &[0, 0, 0, 1], &[4.0, 7.0, 2.0, 1.0]),
            [4.0, 7.0, 7.0, 7.0]
        );
    }

    #[test]
    fn test_ascending_input_keeps_single_entry() {
        let mut max = WindowMax::new(5).unwrap();
        for i in 0..20 {
            max.record(i, i as f64).unwrap();
            assert_eq!(max.current(), Some(i as f64));
            assert_eq!(max.len(), 1);
        }
    }

    #[test]
    fn test_descending_input_only_ages_out() {
        let mut max = WindowMax::new(5).unwrap();
        for i in 0..20 {
            max.record(i, 100.0 - i as f64).unwrap();
            assert_eq!(max.len(), (i as usize + 1).min(5));
            let oldest = (i - 4).max(0);
            assert_eq!(max.current(), Some(100.0 - oldest as f64));
            assert_ordered(&max);
        }
    }

    #[test]
    fn test_current_is_idempotent() {
        let mut max = WindowMax::new(4).unwrap();
        max.record(0, 3.0).unwrap();
        max.record(1, 1.0).unwrap();
        let first = max.current();
        assert_eq!(max.current(), first);
        assert_eq!(max.current(), Some(3.0));
    }

    #[test]
    fn test_ties_keep_newest_entry() {
        let mut max = WindowMax::new(5).unwrap();
        max.record(0, 2.0).unwrap();
        max.record(3, 2.0).unwrap();
        let entries: Vec<_> = max.entries().copied().collect();
        assert_eq!(entries, [Entry::new(2.0, 3)]);
    }

    #[test]
    fn test_non_monotonic_index_rejected() {
        let mut max = WindowMax::new(5).unwrap();
        max.record(10, 1.0).unwrap();
        assert_eq!(
            max.record(9, 50.0),
            Err(WindowError::NonMonotonicIndex {
                previous: 10,
                index: 9
            })
        );
        assert_eq!(max.current(), Some(1.0));
        assert_eq!(max.len(), 1);
        assert_eq!(max.horizon(), Some(10));
    }

    #[test]
    fn test_nan_rejected() {
        let mut max = WindowMax::new(5).unwrap();
        max.record(0, 1.0).unwrap();
        assert_eq!(max.record(1, f64::NAN), Err(WindowError::NanValue));
        assert_eq!(max.current(), Some(1.0));
        assert_eq!(max.horizon(), Some(0));
    }

    #[test]
    fn test_infinities_are_ordered() {
        let mut max = WindowMax::new(2).unwrap();
        max.record(0, f64::NEG_INFINITY).unwrap();
        assert_eq!(max.current(), Some(f64::NEG_INFINITY));
        max.record(1, f64::INFINITY).unwrap();
        assert_eq!(max.current(), Some(f64::INFINITY));
    }

    #[test]
    fn test_advance_ages_out_peaks() {
        let mut max = WindowMax::new(3).unwrap();
        max.record(0, 9.0).unwrap();
        max.record(1, 4.0).unwrap();

        max.advance(2).unwrap();
        assert_eq!(max.current(), Some(9.0));
        max.advance(3).unwrap();
        assert_eq!(max.current(), Some(4.0));
        max.advance(4).unwrap();
        assert_eq!(max.current(), None);
        assert!(max.is_empty());

        assert!(matches!(
            max.record(3, 1.0),
            Err(WindowError::NonMonotonicIndex { .. })
        ));
        max.record(4, 1.0).unwrap();
        assert_eq!(max.current(), Some(1.0));
    }

    #[test]
    fn test_reset() {
        let mut max = WindowMax::new(3).unwrap();
        max.record(100, 9.0).unwrap();
        max.reset();
        assert_eq!(max.current(), None);
        assert_eq!(max.horizon(), None);
        assert_eq!(max.capacity(), 3);

        // lower indices are accepted again after a reset
        max.record(0, 1.0).unwrap();
        assert_eq!(max.current(), Some(1.0));
    }

    #[test]
    fn test_f32_values() {
        let mut max = WindowMax::<f32>::new(2).unwrap();
        max.record(0, 1.5).unwrap();
        max.record(1, 0.5).unwrap();
        assert_eq!(max.current(), Some(1.5));
        max.record(2, 0.25).unwrap();
        assert_eq!(max.current(), Some(0.5));
    }

    #[test]
    fn test_matches_naive_recomputation() {
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for capacity in [1, 2, 3, 5, 8, 13] {
            let mut max = WindowMax::new(capacity).unwrap();
            let mut history: Vec<(i64, f64)> = vec![];
            let mut index = 0i64;

            for _ in 0..500 {
                index += rng.gen_range(0..3);
                let value = rng.gen_range(-50..50) as f64;
                max.record(index, value).unwrap();
                history.push((index, value));

                let expected = history
                    .iter()
                    .filter(|(j, _)| index - j < capacity as i64)
                    .map(|&(_, v)| v)
                    .fold(f64::NEG_INFINITY, f64::max);

                assert_eq!(max.current(), Some(expected), "capacity {capacity}");
                assert_ordered(&max);
            }
        }
    }
}
