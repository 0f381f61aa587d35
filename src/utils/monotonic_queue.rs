use alloc::collections::TryReserveError;

use log::trace;

use super::Deque;
use crate::Entry;

/// Monotonic queue of indexed entries tracking a trailing maximum
///
/// Entries are kept oldest to newest with strictly ascending indices and
/// non-increasing values, so the front always holds the window maximum.
/// Callers must submit non-decreasing indices; this type does not check it.
///
/// # Type Parameters
///
/// * `T` - The type of the recorded values
#[derive(Debug, Clone)]
pub struct MonotonicQueue<T> {
    deque: Deque<Entry<T>>,
}

impl<T> MonotonicQueue<T>
where
    T: PartialOrd + Copy + Default,
{
    /// Creates a new `MonotonicQueue` instance with the specified capacity.
    ///
    /// # Arguments
    ///
    /// * `window_size` - Width of the trailing window in index units
    ///
    /// # Returns
    ///
    /// * `Result<Self, TryReserveError>` - The queue, or the allocation failure
    #[inline]
    pub fn new(window_size: usize) -> Result<Self, TryReserveError> {
        Ok(Self {
            deque: Deque::new(window_size)?,
        })
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        self.deque.capacity()
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.deque.len()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.deque.is_empty()
    }

    /// Determines if an entry index has fallen out of the window ending at `index`
    #[inline]
    fn is_outside_window(&self, entry_index: i64, index: i64) -> bool {
        index.abs_diff(entry_index) >= self.capacity() as u64
    }

    /// Removes expired elements from the front of the deque
    #[inline]
    pub fn remove_expired_elements(&mut self, index: i64) {
        while let Some(&Entry {
            index: entry_index,
            ..
        }) = self.deque.front()
        {
            if self.is_outside_window(entry_index, index) {
                trace!("evicting entry at index {entry_index}, window now ends at {index}");
                self.deque.pop_front();
            } else {
                break;
            }
        }
    }

    /// Maintains monotonic property by removing dominated elements
    ///
    /// Equal values are dominated too, so on ties the newest entry survives.
    #[inline]
    fn maintain_monotonic_property(&mut self, value: T) {
        while let Some(&Entry { value: existing, .. }) = self.deque.back() {
            if existing <= value {
                self.deque.pop_back();
            } else {
                break;
            }
        }
    }

    /// Pushes a new value recorded at `index` into the queue
    ///
    /// # Arguments
    ///
    /// * `index` - Position in the index stream, not below any earlier one
    /// * `value` - The value to push into the queue
    #[inline]
    pub fn push(&mut self, index: i64, value: T) {
        self.maintain_monotonic_property(value);
        self.remove_expired_elements(index);
        // A larger value already sits at this index and outlives the new one
        if self.deque.back().is_some_and(|back| back.index == index) {
            return;
        }
        // Expiry above guarantees a free slot; Deque::push_back panics otherwise.
        self.deque.push_back(Entry::new(value, index));
        debug_assert!(self.is_monotonic(), "window order violated");
    }

    /// Returns the front element of the queue
    ///
    /// # Returns
    ///
    /// * `Option<T>` - The window maximum, or `None` if the queue is empty
    #[inline]
    pub fn front(&self) -> Option<T> {
        self.deque.front().map(|entry| entry.value)
    }

    /// Returns the retained entries, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Entry<T>> {
        self.deque.iter()
    }

    /// Resets the queue to its initial state
    ///
    /// # Returns
    ///
    /// * `&mut Self` - The queue object
    #[inline]
    pub fn reset(&mut self) -> &mut Self {
        self.deque.reset();
        self
    }

    /// Checks ascending indices and non-increasing values, oldest to newest
    fn is_monotonic(&self) -> bool {
        let mut entries = self.deque.iter();
        let Some(mut prev) = entries.next() else {
            return true;
        };
        for entry in entries {
            if entry.index <= prev.index || entry.value > prev.value {
                return false;
            }
            prev = entry;
        }
        true
    }
}
