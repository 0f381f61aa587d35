use alloc::{boxed::Box, collections::TryReserveError, vec::Vec};

/// A fixed-capacity double-ended queue over a circular buffer
///
/// Slots are addressed as `(first + offset) % cap`. The buffer is allocated once
/// and never grows; pushing into a full deque is a logic error and panics.
#[derive(Debug, Clone)]
pub struct Deque<T> {
    /// The buffer with fixed capacity and allocated on the heap.
    buf: Box<[T]>,
    /// The capacity of the deque
    cap: usize,
    /// Slot of the front (oldest) element
    first: usize,
    /// The current number of elements stored in the deque
    len: usize,
}

impl<T> Deque<T>
where
    T: Default + Clone,
{
    /// Creates a new `Deque` instance with the specified capacity.
    ///
    /// # Arguments
    ///
    /// * `cap` - The capacity of the deque
    ///
    /// # Returns
    ///
    /// * `Result<Self, TryReserveError>` - The `Deque` instance, or the
    ///   allocation failure when `cap` slots can not be reserved
    #[inline]
    pub fn new(cap: usize) -> Result<Self, TryReserveError> {
        assert!(cap > 0, "capacity must be > 0");
        let mut buf = Vec::new();
        buf.try_reserve_exact(cap)?;
        buf.resize(cap, T::default());
        Ok(Self {
            buf: buf.into_boxed_slice(),
            cap,
            first: 0,
            len: 0,
        })
    }

    /// Returns true if the deque is empty
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if the deque is full
    #[inline]
    pub const fn is_full(&self) -> bool {
        self.len == self.cap
    }

    /// Returns the current number of elements stored in the deque
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns the capacity of the deque
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.cap
    }

    #[inline]
    const fn slot(&self, offset: usize) -> usize {
        (self.first + offset) % self.cap
    }

    /// Resets the deque, clearing all elements and resetting the indices
    #[inline]
    pub fn reset(&mut self) -> &mut Self {
        self.buf.fill(T::default());
        self.first = 0;
        self.len = 0;
        self
    }

    /// Pushes a new element to the back of the deque
    ///
    /// # Panics
    ///
    /// If the deque is already full. Callers evict before appending, so a full
    /// deque here means their eviction logic is broken.
    #[inline]
    pub fn push_back(&mut self, value: T) {
        assert!(
            !self.is_full(),
            "deque length would exceed its capacity of {}",
            self.cap
        );
        let idx = self.slot(self.len);
        self.buf[idx] = value;
        self.len += 1;
    }

    /// Pops the element from the back of the deque
    ///
    /// # Returns
    ///
    /// * `Option<T>` - The element at the back of the deque, or `None` if empty
    #[inline]
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        self.len -= 1;
        let idx = self.slot(self.len);
        Some(core::mem::take(&mut self.buf[idx]))
    }

    /// Pops the element from the front of the deque
    ///
    /// # Returns
    ///
    /// * `Option<T>` - The element at the front of the deque, or `None` if empty
    #[inline]
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        let value = core::mem::take(&mut self.buf[self.first]);
        self.first = (self.first + 1) % self.cap;
        self.len -= 1;

        Some(value)
    }

    /// Returns a reference to the front element of the deque
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    /// Returns a reference to the back element of the deque
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|i| self.get(i))
    }

    /// Returns a reference to the element at the specified offset from the front
    ///
    /// # Arguments
    ///
    /// * `i` - Offset from the front of the deque
    ///
    /// # Returns
    ///
    /// * `Option<&T>` - The element, or `None` if `i` is out of bounds
    #[inline]
    pub fn get(&self, i: usize) -> Option<&T> {
        if i >= self.len {
            None
        } else {
            Some(&self.buf[self.slot(i)])
        }
    }

    /// Returns an iterator over the elements from front to back
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        (0..self.len).map(move |i| &self.buf[self.slot(i)])
    }
}
