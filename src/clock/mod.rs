//! Clock-in/clock-out logic.
//!
//! [`PointageService`] implements the attendance rules on top of a
//! [`RecordStore`](crate::store::RecordStore); [`calendar`] supplies the
//! time source and the weekday classification it relies on.

pub mod calendar;
mod service;

pub use calendar::{day_kind, Clock, ClockReading, DayKind, FixedClock, SystemClock};
pub use service::{ClockReceipt, PointageService};
