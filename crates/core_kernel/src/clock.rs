//! Clock abstraction and calendar helpers
//!
//! Receipt numbering and email cooldowns both depend on wall-clock time.
//! Services take a `Clock` so tests can drive time explicitly instead of
//! sleeping.

use chrono::{DateTime, Datelike, TimeZone, Utc};

/// Source of the current instant.
pub trait Clock: Send + Sync {
    /// Returns the current UTC time
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Returns the first instant of the calendar month containing `at`.
///
/// Used as the lower bound when counting an owner's receipts for the
/// month-scoped sequence number.
pub fn month_start(at: DateTime<Utc>) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(at.year(), at.month(), 1, 0, 0, 0)
        .single()
        .expect("first day of month at midnight UTC is always valid")
}
