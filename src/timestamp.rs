use core::time::Duration;

/// A point in time that can be placed on the Unix time line
///
/// [`TimedMax`](crate::TimedMax) buckets anything implementing this trait.
/// Implementations exist for [`Duration`] (read as the offset since the Unix
/// epoch), `std::time::SystemTime` with the `std` feature and
/// `chrono::DateTime` with the `chrono` feature.
pub trait Timestamp {
    /// Returns signed nanoseconds since 1970-01-01T00:00:00Z
    fn unix_nanos(&self) -> i128;
}

impl Timestamp for Duration {
    #[inline]
    fn unix_nanos(&self) -> i128 {
        self.as_nanos() as i128
    }
}

impl<T: Timestamp + ?Sized> Timestamp for &T {
    #[inline]
    fn unix_nanos(&self) -> i128 {
        (**self).unix_nanos()
    }
}

#[cfg(feature = "std")]
impl Timestamp for std::time::SystemTime {
    fn unix_nanos(&self) -> i128 {
        match self.duration_since(std::time::UNIX_EPOCH) {
            Ok(since) => since.as_nanos() as i128,
            Err(before) => -(before.duration().as_nanos() as i128),
        }
    }
}

#[cfg(feature = "chrono")]
impl<Tz: chrono::TimeZone> Timestamp for chrono::DateTime<Tz> {
    fn unix_nanos(&self) -> i128 {
        i128::from(self.timestamp()) * 1_000_000_000 + i128::from(self.timestamp_subsec_nanos())
    }
}
