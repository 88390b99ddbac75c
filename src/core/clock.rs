//! Clock Port
//!
//! Wall-clock access behind a trait so lives regeneration stays a pure
//! function of injected time. `SystemClock` reads the OS clock;
//! `ManualClock` is advanced explicitly by tests and demos.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, Duration, Utc};

/// Source of the current wall-clock time.
///
/// The session owns one clock instance and reads it at every operation
/// that needs `now`. The engine never schedules anything; callers drive
/// periodic regeneration checks on their own cadence.
pub trait Clock {
    /// Current wall-clock time.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the operating system.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock for tests and deterministic demos.
///
/// Clones share the same underlying instant, so a caller can keep one
/// handle and advance time while a session owns another.
///
/// # Example
///
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use hunch::core::clock::{Clock, ManualClock};
///
/// let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());
/// let handle = clock.clone();
/// handle.advance(Duration::seconds(90));
/// assert_eq!(clock.now(), handle.now());
/// ```
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: Rc<Cell<DateTime<Utc>>>,
}

impl ManualClock {
    /// Create a clock frozen at `start`.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    /// Move the clock forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        self.now.set(self.now.get() + delta);
    }

    /// Jump the clock to an absolute instant.
    pub fn set(&self, now: DateTime<Utc>) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::new(t0());
        assert_eq!(clock.now(), t0());

        clock.advance(Duration::seconds(60));
        assert_eq!(clock.now(), t0() + Duration::seconds(60));
    }

    #[test]
    fn test_manual_clock_shared_handles() {
        let clock = ManualClock::new(t0());
        let handle = clock.clone();

        handle.advance(Duration::hours(2));
        assert_eq!(clock.now(), t0() + Duration::hours(2));

        clock.set(t0());
        assert_eq!(handle.now(), t0());
    }

    #[test]
    fn test_system_clock_monotonic_enough() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
