use thiserror::Error;

/// Errors reported by [`WindowMax`](crate::WindowMax) and [`TimedMax`](crate::TimedMax).
///
/// Rejected records leave the tracker untouched, so a caller may log the
/// error and keep feeding the same instance.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowError {
    /// A window must retain at least one index unit
    #[error("window capacity must be at least 1")]
    ZeroCapacity,

    /// Buckets of zero width can not partition time
    #[error("granularity must be a positive duration")]
    ZeroGranularity,

    /// The window is too large to allocate, or `ceil(duration / granularity)`
    /// does not fit in `usize`
    #[error("window capacity is too large to allocate")]
    CapacityOverflow,

    /// An index lower than one already submitted
    #[error("index {index} is behind the window horizon {previous}")]
    NonMonotonicIndex {
        /// Greatest index submitted so far
        previous: i64,
        /// Rejected index
        index: i64,
    },

    /// NaN can not be ordered against retained values
    #[error("NaN can not be recorded")]
    NanValue,

    /// The bucket index of a timestamp does not fit in `i64`
    #[error("timestamp bucket index is out of range")]
    TimestampOutOfRange,
}

/// Result alias used throughout the crate
pub type Result<T> = core::result::Result<T, WindowError>;

#[cfg(test)]
mod tests {
    use super::WindowError;

    #[test]
    fn test_display_messages() {
        let err = WindowError::NonMonotonicIndex {
            previous: 10,
            index: 7,
        };
        assert_eq!(
            format!("{err}"),
            "index 7 is behind the window horizon 10"
        );
        assert_eq!(
            format!("{}", WindowError::ZeroCapacity),
            "window capacity must be at least 1"
        );
    }
}
