//! Time source for the session store.
//!
//! Every timestamp the store assigns and every "today" it filters on comes from a
//! [`Clock`]. Production code uses [`SystemClock`] (the process's local wall clock);
//! tests use [`ManualClock`] to pin and advance time deterministically.

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use std::fmt;
use std::sync::{Mutex, PoisonError};

/// Source of the current local instant.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Current local wall-clock time.
    fn now(&self) -> NaiveDateTime;

    /// Current local calendar date.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Reads the process's local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock that only moves when told to.
///
/// ```rust
/// use chrono::{Duration, NaiveDate};
/// use healthcoach::clock::{Clock, ManualClock};
///
/// let start = NaiveDate::from_ymd_opt(2024, 3, 1)
///     .unwrap()
///     .and_hms_opt(23, 30, 0)
///     .unwrap();
/// let clock = ManualClock::new(start);
/// clock.advance(Duration::hours(1));
/// assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
/// ```
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<NaiveDateTime>,
}

impl ManualClock {
    /// Start the clock at `start`.
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Jump to an absolute instant.
    pub fn set(&self, instant: NaiveDateTime) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = instant;
    }

    /// Move forward (or backward, for negative durations).
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_manual_clock_set_and_advance() {
        let clock = ManualClock::new(at(2024, 1, 10, 8, 0));
        assert_eq!(clock.now(), at(2024, 1, 10, 8, 0));

        clock.advance(Duration::minutes(90));
        assert_eq!(clock.now(), at(2024, 1, 10, 9, 30));

        clock.set(at(2023, 12, 31, 23, 59));
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
    }

    #[test]
    fn test_system_clock_today_matches_now() {
        let clock = SystemClock;
        let now = clock.now();
        // Allow for the test straddling midnight.
        let today = clock.today();
        assert!(today == now.date() || today == now.date().succ_opt().unwrap());
    }
}
