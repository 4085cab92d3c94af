//! Manually driven clock
//!
//! Lets tests step through cooldown windows and month boundaries without
//! sleeping.

use std::sync::Mutex;

use chrono::{DateTime, Duration, TimeZone, Utc};
use core_kernel::Clock;

/// A clock whose current time is set explicitly by the test
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Creates a clock frozen at the given instant
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now: Mutex::new(now) }
    }

    /// Creates a clock at a fixed mid-month instant (2025-08-15 10:00 UTC)
    pub fn default_test_time() -> Self {
        Self::at(Utc.with_ymd_and_hms(2025, 8, 15, 10, 0, 0).unwrap())
    }

    /// Advances the clock by the given duration
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }

    /// Jumps the clock to the given instant
    pub fn set(&self, to: DateTime<Utc>) {
        *self.now.lock().unwrap() = to;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}
