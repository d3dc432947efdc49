//! Wall-clock capability used to stamp new items.
//!
//! # Responsibility
//! - Decouple timestamp capture from the ambient system time.
//!
//! # Invariants
//! - Returned timestamps carry whole seconds only.

use chrono::{Duration, Local, NaiveDateTime, Timelike};
use std::cell::Cell;

/// Source of "now" for item creation.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Local system time, truncated to seconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        let now = Local::now().naive_local();
        now.with_nanosecond(0).unwrap_or(now)
    }
}

/// Deterministic clock for tests and scripted sessions.
#[derive(Debug, Clone)]
pub struct FixedClock {
    current: Cell<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(at: NaiveDateTime) -> Self {
        let at = at.with_nanosecond(0).unwrap_or(at);
        Self {
            current: Cell::new(at),
        }
    }

    /// Moves the clock forward by `seconds`.
    pub fn advance(&self, seconds: i64) {
        self.current
            .set(self.current.get() + Duration::seconds(seconds));
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.current.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, FixedClock, SystemClock};
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn system_clock_has_no_subseconds() {
        assert_eq!(SystemClock.now().nanosecond(), 0);
    }

    #[test]
    fn fixed_clock_advances() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1)
            .and_then(|d| d.and_hms_opt(23, 59, 59))
            .unwrap();
        let clock = FixedClock::new(start);
        assert_eq!(clock.now(), start);

        clock.advance(1);
        assert_eq!(
            clock.now().format("%Y-%m-%dT%H:%M:%S").to_string(),
            "2026-01-02T00:00:00"
        );
    }
}
