/// A value retained by a window together with the index it was recorded at
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Entry<T> {
    /// Recorded value
    pub value: T,
    /// Caller-assigned position in the index stream
    pub index: i64,
}

impl<T> Entry<T> {
    /// Creates a new entry
    #[inline]
    pub const fn new(value: T, index: i64) -> Self {
        Self { value, index }
    }
}
