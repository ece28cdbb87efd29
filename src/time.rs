use std::time::{SystemTime, UNIX_EPOCH};

/// Default epoch: Thursday, November 4, 2010 1:42:54.657 UTC, in milliseconds
/// since the Unix epoch.
///
/// Timestamps are encoded relative to this origin unless a generator is
/// constructed with a custom epoch. The value is part of the wire contract:
/// existing IDs can only be decomposed correctly against the epoch they were
/// encoded with.
pub const DEFAULT_EPOCH: u64 = 1_288_834_974_657;

/// A source of wall-clock time for ID generation.
///
/// Generators never read the clock ambiently; they go through this trait, so
/// deterministic tests can plug in a mock and simulate forward or backward
/// clock jumps without depending on real timing.
///
/// Implementations report **absolute** milliseconds since the Unix epoch; the
/// generator subtracts its configured epoch when encoding.
///
/// # Example
///
/// ```
/// use frostid::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1234
///     }
/// }
///
/// assert_eq!(FixedTime.current_millis(), 1234);
/// ```
pub trait TimeSource {
    /// Returns the current time in milliseconds since the Unix epoch.
    fn current_millis(&self) -> u64;
}

/// The system wall clock.
///
/// Reads [`SystemTime`] on every call. Wall clocks may be stepped backwards by
/// NTP corrections or manual adjustment; generators surface that as
/// [`Error::ClockMovedBackwards`] instead of papering over it.
///
/// [`Error::ClockMovedBackwards`]: crate::Error::ClockMovedBackwards
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    /// Returns the number of milliseconds since the Unix epoch.
    ///
    /// # Panics
    ///
    /// Panics if the system clock is set before the Unix epoch.
    fn current_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before UNIX_EPOCH")
            .as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_past_default_epoch() {
        let now = SystemClock.current_millis();
        assert!(now > DEFAULT_EPOCH);
    }
}
