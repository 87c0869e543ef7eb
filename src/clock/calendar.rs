//! Wall-clock access and day classification.
//!
//! The service never reads the system time directly; it asks a [`Clock`].
//! This keeps weekend gating and time stamping testable with a
//! [`FixedClock`].

use std::sync::{PoisonError, RwLock};

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, Weekday};

/// Source of the server-local wall time.
pub trait Clock: Send + Sync {
    /// Returns the current server-local date and time.
    fn now(&self) -> NaiveDateTime;
}

/// The machine's local clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock that returns a settable instant.
#[derive(Debug)]
pub struct FixedClock {
    now: RwLock<NaiveDateTime>,
}

impl FixedClock {
    /// Creates a clock frozen at `now`.
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    /// Moves the clock to `now`.
    pub fn set(&self, now: NaiveDateTime) {
        *self.now.write().unwrap_or_else(PoisonError::into_inner) = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.read().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Kind of day for clocking purposes.
///
/// # Example
///
/// ```
/// use pointage::clock::{day_kind, DayKind};
/// use chrono::NaiveDate;
///
/// // 2026-01-17 is a Saturday
/// let saturday = NaiveDate::from_ymd_opt(2026, 1, 17).unwrap();
/// assert_eq!(day_kind(saturday), DayKind::Saturday);
/// assert!(day_kind(saturday).is_weekend());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayKind {
    /// Monday through Friday.
    Weekday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
}

impl DayKind {
    /// Returns true for Saturday and Sunday.
    pub fn is_weekend(self) -> bool {
        matches!(self, DayKind::Saturday | DayKind::Sunday)
    }
}

/// Classifies a calendar day.
pub fn day_kind(date: NaiveDate) -> DayKind {
    match date.weekday() {
        Weekday::Sat => DayKind::Saturday,
        Weekday::Sun => DayKind::Sunday,
        _ => DayKind::Weekday,
    }
}

/// The date and display time stamped on a clock event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockReading {
    /// The calendar day.
    pub date: NaiveDate,
    /// 24-hour "HH:MM" display time.
    pub time: String,
}

impl ClockReading {
    /// Takes a reading from a local date and time.
    pub fn at(now: NaiveDateTime) -> Self {
        Self {
            date: now.date(),
            time: now.format("%H:%M").to_string(),
        }
    }

    /// Returns the kind of day of this reading.
    pub fn day_kind(&self) -> DayKind {
        day_kind(self.date)
    }
}
