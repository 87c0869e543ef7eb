//! Record store clients.
//!
//! The clock service talks to the employee and presence tables through the
//! [`RecordStore`] trait. [`AirtableStore`] is the production implementation;
//! [`MemoryStore`] keeps everything in process and is used by tests and
//! benchmarks.

mod airtable;
pub mod formula;
mod memory;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::StoreResult;
use crate::models::{AttendancePatch, AttendanceRecord, Employee, NewAttendance};

pub use airtable::AirtableStore;
pub use memory::MemoryStore;

/// Access to the employee and presence tables.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fails with [`StoreError::MissingCredentials`](crate::error::StoreError::MissingCredentials)
    /// when the store cannot be used.
    fn check_configuration(&self) -> StoreResult<()> {
        Ok(())
    }

    /// Returns the first employee whose PIN equals `pin` exactly.
    async fn find_employee_by_pin(&self, pin: &str) -> StoreResult<Option<Employee>>;

    /// Returns the attendance row of `employee_id` for `date`, if any.
    async fn find_attendance(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> StoreResult<Option<AttendanceRecord>>;

    /// Creates the attendance row for an employee and day.
    ///
    /// Fails with [`StoreError::Conflict`](crate::error::StoreError::Conflict)
    /// if a row for the same employee and day already exists, so at most one
    /// row per employee and day survives concurrent clock-ins.
    async fn create_attendance(&self, new: NewAttendance) -> StoreResult<AttendanceRecord>;

    /// Writes the set fields of `patch` to an existing row.
    async fn update_attendance(
        &self,
        record_id: &str,
        patch: AttendancePatch,
    ) -> StoreResult<AttendanceRecord>;
}

/// Picks the row that survives when several exist for one employee and day:
/// the earliest created, ties broken by id.
///
/// Two rows created in the same millisecond can each be kept if each
/// creator re-read the day before the other row existed.
pub(crate) fn canonical_record(records: &[AttendanceRecord]) -> Option<&AttendanceRecord> {
    records
        .iter()
        .min_by(|a, b| match (a.created_at, b.created_at) {
            (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.id.cmp(&b.id)),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.id.cmp(&b.id),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(id: &str, created_second: Option<u32>) -> AttendanceRecord {
        AttendanceRecord {
            id: id.to_string(),
            employee_ids: vec!["recEMP1".to_string()],
            date: NaiveDate::from_ymd_opt(2026, 1, 13).unwrap(),
            arrival: Some("08:01".to_string()),
            departure: None,
            created_at: created_second
                .map(|s| Utc.with_ymd_and_hms(2026, 1, 13, 7, 1, s).unwrap()),
        }
    }

    #[test]
    fn test_canonical_record_prefers_earliest_creation() {
        let records = vec![record("recA", Some(5)), record("recB", Some(2))];
        assert_eq!(canonical_record(&records).unwrap().id, "recB");
    }

    #[test]
    fn test_canonical_record_breaks_ties_by_id() {
        let records = vec![record("recZ", Some(2)), record("recA", Some(2))];
        assert_eq!(canonical_record(&records).unwrap().id, "recA");
    }

    #[test]
    fn test_canonical_record_prefers_known_creation_time() {
        let records = vec![record("recA", None), record("recB", Some(59))];
        assert_eq!(canonical_record(&records).unwrap().id, "recB");
    }

    #[test]
    fn test_canonical_record_of_empty_slice() {
        assert!(canonical_record(&[]).is_none());
    }
}
