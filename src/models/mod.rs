//! Core data models for the pointage service.
//!
//! This module contains the domain models shared by the store clients,
//! the clock service and the HTTP API.

mod attendance;
mod clock_type;
mod employee;

pub use attendance::{AttendancePatch, AttendanceRecord, NewAttendance};
pub use clock_type::ClockType;
pub use employee::{Employee, DEFAULT_DISPLAY_NAME};
