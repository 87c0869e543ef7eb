//! Attendance ("présence") records and their write models.
//!
//! One [`AttendanceRecord`] exists per employee and calendar day. It is
//! created on the first clock-in and patched once on clock-out.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// An attendance row as stored in the presence table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Record identifier in the store.
    pub id: String,
    /// Linked employee record identifiers.
    #[serde(default)]
    pub employee_ids: Vec<String>,
    /// The calendar day this row covers.
    pub date: NaiveDate,
    /// Arrival time, "HH:MM".
    #[serde(default)]
    pub arrival: Option<String>,
    /// Departure time, "HH:MM".
    #[serde(default)]
    pub departure: Option<String>,
    /// Creation timestamp reported by the store, used to order duplicates.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl AttendanceRecord {
    /// Returns true if the row is linked to the given employee.
    pub fn belongs_to(&self, employee_id: &str) -> bool {
        self.employee_ids.iter().any(|id| id == employee_id)
    }

    /// Returns true if an arrival time is recorded.
    pub fn has_arrival(&self) -> bool {
        is_set(&self.arrival)
    }

    /// Returns true if a departure time is recorded.
    pub fn has_departure(&self) -> bool {
        is_set(&self.departure)
    }
}

// Blank strings count as unset; the store may keep them after manual edits.
fn is_set(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

/// Fields of a new attendance row created on clock-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttendance {
    /// The employee the row is linked to.
    pub employee_id: String,
    /// The calendar day.
    pub date: NaiveDate,
    /// Arrival time, "HH:MM".
    pub arrival: String,
}

/// Partial update of an attendance row. Only set fields are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendancePatch {
    /// New arrival time.
    pub arrival: Option<String>,
    /// New departure time.
    pub departure: Option<String>,
}

impl AttendancePatch {
    /// A patch setting only the arrival time.
    pub fn arrival(time: impl Into<String>) -> Self {
        Self {
            arrival: Some(time.into()),
            departure: None,
        }
    }

    /// A patch setting only the departure time.
    pub fn departure(time: impl Into<String>) -> Self {
        Self {
            arrival: None,
            departure: Some(time.into()),
        }
    }

    /// Applies the patch to a record in place.
    pub fn apply_to(&self, record: &mut AttendanceRecord) {
        if let Some(arrival) = &self.arrival {
            record.arrival = Some(arrival.clone());
        }
        if let Some(departure) = &self.departure {
            record.departure = Some(departure.clone());
        }
    }
}
