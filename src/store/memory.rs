//! In-process record store.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::Mutex;

use crate::error::{StoreError, StoreResult};
use crate::models::{AttendancePatch, AttendanceRecord, Employee, NewAttendance};

use super::RecordStore;

#[derive(Debug, Default)]
struct Tables {
    employees: Vec<Employee>,
    attendance: Vec<AttendanceRecord>,
    next_id: u64,
}

/// A [`RecordStore`] kept entirely in memory.
///
/// The uniqueness of (employee, day) rows is enforced under a single lock.
/// Lookup counters let tests assert which calls were made.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    employee_lookups: AtomicUsize,
    attendance_lookups: AtomicUsize,
    writes: AtomicUsize,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with employees.
    pub fn with_employees(employees: impl IntoIterator<Item = Employee>) -> Self {
        Self {
            tables: Mutex::new(Tables {
                employees: employees.into_iter().collect(),
                ..Tables::default()
            }),
            ..Self::default()
        }
    }

    /// Inserts a row as is, bypassing the uniqueness check.
    pub async fn insert_attendance(&self, record: AttendanceRecord) {
        self.tables.lock().await.attendance.push(record);
    }

    /// Returns a copy of every attendance row.
    pub async fn attendance(&self) -> Vec<AttendanceRecord> {
        self.tables.lock().await.attendance.clone()
    }

    /// Number of employee lookups served.
    pub fn employee_lookups(&self) -> usize {
        self.employee_lookups.load(Ordering::SeqCst)
    }

    /// Number of attendance lookups served.
    pub fn attendance_lookups(&self) -> usize {
        self.attendance_lookups.load(Ordering::SeqCst)
    }

    /// Number of successful creates and updates.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn find_employee_by_pin(&self, pin: &str) -> StoreResult<Option<Employee>> {
        self.employee_lookups.fetch_add(1, Ordering::SeqCst);
        let tables = self.tables.lock().await;
        Ok(tables.employees.iter().find(|e| e.pin == pin).cloned())
    }

    async fn find_attendance(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> StoreResult<Option<AttendanceRecord>> {
        self.attendance_lookups.fetch_add(1, Ordering::SeqCst);
        let tables = self.tables.lock().await;
        Ok(tables
            .attendance
            .iter()
            .find(|r| r.date == date && r.belongs_to(employee_id))
            .cloned())
    }

    async fn create_attendance(&self, new: NewAttendance) -> StoreResult<AttendanceRecord> {
        let mut tables = self.tables.lock().await;
        if tables
            .attendance
            .iter()
            .any(|r| r.date == new.date && r.belongs_to(&new.employee_id))
        {
            return Err(StoreError::Conflict {
                employee_id: new.employee_id,
                date: new.date,
            });
        }

        tables.next_id += 1;
        let record = AttendanceRecord {
            id: format!("recMEM{}", tables.next_id),
            employee_ids: vec![new.employee_id],
            date: new.date,
            arrival: Some(new.arrival),
            departure: None,
            created_at: Some(Utc::now()),
        };
        tables.attendance.push(record.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(record)
    }

    async fn update_attendance(
        &self,
        record_id: &str,
        patch: AttendancePatch,
    ) -> StoreResult<AttendanceRecord> {
        let mut tables = self.tables.lock().await;
        let record = tables
            .attendance
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or_else(|| StoreError::Upstream {
                operation: "update_attendance",
                status: 404,
                body: format!("record {} not found", record_id),
            })?;
        patch.apply_to(record);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(record.clone())
    }
}
