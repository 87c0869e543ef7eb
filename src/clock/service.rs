//! The clock-in/clock-out rules.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::{PointageError, PointageResult, StoreError};
use crate::models::{AttendancePatch, ClockType, Employee, NewAttendance};
use crate::store::RecordStore;

use super::calendar::{Clock, ClockReading};

/// Outcome of an accepted clock event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockReceipt {
    /// The employee's record id.
    pub employee_id: String,
    /// Name shown back to the employee.
    pub name: String,
    /// The kind of event recorded.
    pub clock_type: ClockType,
    /// The day of the event.
    pub date: NaiveDate,
    /// "HH:MM" time written to the attendance row.
    pub time: String,
    /// The attendance row created or updated.
    pub record_id: String,
}

/// Applies clock events against a [`RecordStore`].
///
/// Every event runs the same sequence: configuration check, PIN lookup,
/// active check, weekend check, then a create or patch of the day's
/// attendance row. Store calls are awaited one after another.
#[derive(Clone)]
pub struct PointageService {
    store: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,
}

impl PointageService {
    /// Creates a service over a store and a time source.
    pub fn new(store: Arc<dyn RecordStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Records an arrival or a departure for the employee owning `pin`.
    pub async fn clock(&self, pin: &str, clock_type: ClockType) -> PointageResult<ClockReceipt> {
        self.store.check_configuration().map_err(|err| match err {
            StoreError::MissingCredentials { missing } => PointageError::Configuration { missing },
            other => other.into(),
        })?;

        let employee = self.authenticate(pin).await?;

        let reading = ClockReading::at(self.clock.now());
        if reading.day_kind().is_weekend() {
            return Err(PointageError::WeekendForbidden { date: reading.date });
        }

        let record_id = match clock_type {
            ClockType::Arrival => self.record_arrival(&employee, &reading).await?,
            ClockType::Departure => self.record_departure(&employee, &reading).await?,
        };

        info!(
            employee_id = %employee.id,
            clock_type = %clock_type,
            date = %reading.date,
            time = %reading.time,
            record_id = %record_id,
            "Clock event recorded"
        );

        Ok(ClockReceipt {
            name: employee.display_name().to_string(),
            employee_id: employee.id,
            clock_type,
            date: reading.date,
            time: reading.time,
            record_id,
        })
    }

    /// Resolves the PIN to an active employee.
    async fn authenticate(&self, pin: &str) -> PointageResult<Employee> {
        // A blank PIN would match employees whose PIN cell is empty.
        if pin.is_empty() {
            return Err(PointageError::InvalidPin);
        }

        let employee = self
            .store
            .find_employee_by_pin(pin)
            .await?
            .ok_or(PointageError::InvalidPin)?;

        if !employee.active {
            return Err(PointageError::InactiveEmployee {
                employee_id: employee.id,
            });
        }
        Ok(employee)
    }

    async fn record_arrival(
        &self,
        employee: &Employee,
        reading: &ClockReading,
    ) -> PointageResult<String> {
        let existing = self.store.find_attendance(&employee.id, reading.date).await?;

        match existing {
            Some(record) if record.has_arrival() => Err(PointageError::AlreadyArrived {
                employee_id: employee.id.clone(),
                date: reading.date,
            }),
            Some(record) => {
                debug!(record_id = %record.id, "Completing arrival on existing row");
                let updated = self
                    .store
                    .update_attendance(&record.id, AttendancePatch::arrival(&reading.time))
                    .await?;
                Ok(updated.id)
            }
            None => {
                let new = NewAttendance {
                    employee_id: employee.id.clone(),
                    date: reading.date,
                    arrival: reading.time.clone(),
                };
                match self.store.create_attendance(new).await {
                    Ok(created) => Ok(created.id),
                    Err(StoreError::Conflict { employee_id, date }) => {
                        Err(PointageError::AlreadyArrived { employee_id, date })
                    }
                    Err(err) => Err(err.into()),
                }
            }
        }
    }

    async fn record_departure(
        &self,
        employee: &Employee,
        reading: &ClockReading,
    ) -> PointageResult<String> {
        let record = self
            .store
            .find_attendance(&employee.id, reading.date)
            .await?
            .ok_or_else(|| PointageError::DepartureWithoutArrival {
                employee_id: employee.id.clone(),
                date: reading.date,
            })?;

        if record.has_departure() {
            return Err(PointageError::AlreadyDeparted {
                employee_id: employee.id.clone(),
                date: reading.date,
            });
        }

        let updated = self
            .store
            .update_attendance(&record.id, AttendancePatch::departure(&reading.time))
            .await?;
        Ok(updated.id)
    }
}
