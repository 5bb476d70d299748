//! Time abstraction traits for platform-agnostic phase timing.
//!
//! The controller never sleeps on its own. It reads the current instant from a
//! [`TimeSource`] and tells the host how long to wait before the next wake-up.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialOrd {
    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;

    /// Saturating subtraction (returns a zero duration on underflow).
    fn saturating_sub(self, other: Self) -> Self;
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    fn duration_since(&self, earlier: Self) -> Self::Duration;
}

impl TimeDuration for core::time::Duration {
    fn as_millis(&self) -> u64 {
        // u128 millis only overflow u64 after ~584 million years
        core::time::Duration::as_millis(self) as u64
    }

    fn from_millis(millis: u64) -> Self {
        core::time::Duration::from_millis(millis)
    }

    fn saturating_sub(self, other: Self) -> Self {
        core::time::Duration::saturating_sub(self, other)
    }
}

/// Monotonic instant backed by `std::time::Instant`.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StdInstant(pub std::time::Instant);

#[cfg(feature = "std")]
impl TimeInstant for StdInstant {
    type Duration = core::time::Duration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        self.0.saturating_duration_since(earlier.0)
    }
}

/// Time source reading the host's monotonic clock.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct StdTimeSource;

#[cfg(feature = "std")]
impl StdTimeSource {
    /// Creates a new host time source.
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "std")]
impl TimeSource<StdInstant> for StdTimeSource {
    fn now(&self) -> StdInstant {
        StdInstant(std::time::Instant::now())
    }
}
