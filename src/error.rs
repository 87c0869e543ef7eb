//! Error types for the pointage service.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure that can occur while loading configuration, talking to
//! the record store, or applying the clock-in/clock-out rules.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised by a [`RecordStore`](crate::store::RecordStore) implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store cannot be reached because credentials or identifiers are missing.
    #[error("Record store is not configured: missing {missing}")]
    MissingCredentials {
        /// Comma-separated names of the missing settings.
        missing: String,
    },

    /// The request never produced an HTTP response (DNS, TLS, timeout...).
    #[error("Record store request '{operation}' failed: {message}")]
    Transport {
        /// The store operation that was attempted.
        operation: &'static str,
        /// A description of the transport failure.
        message: String,
    },

    /// The store answered with a non-success status.
    #[error("Record store returned {status} for '{operation}': {body}")]
    Upstream {
        /// The store operation that was attempted.
        operation: &'static str,
        /// The HTTP status code returned by the store.
        status: u16,
        /// The raw response body.
        body: String,
    },

    /// The store answered with a body that could not be decoded.
    #[error("Could not decode record store response for '{operation}': {message}")]
    Decode {
        /// The store operation that was attempted.
        operation: &'static str,
        /// A description of the decoding failure.
        message: String,
    },

    /// A conditional create found an existing attendance row for the same day.
    #[error("Attendance already exists for employee '{employee_id}' on {date}")]
    Conflict {
        /// The employee the row belongs to.
        employee_id: String,
        /// The calendar day of the row.
        date: NaiveDate,
    },
}

/// The main error type for the pointage service.
///
/// # Example
///
/// ```
/// use pointage::error::PointageError;
///
/// let error = PointageError::ConfigNotFound {
///     path: "/missing/pointage.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/pointage.yaml");
/// ```
#[derive(Debug, Error)]
pub enum PointageError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// A configuration file or variable could not be parsed.
    #[error("Failed to parse configuration '{source_name}': {message}")]
    ConfigParseError {
        /// The file path or variable name that failed to parse.
        source_name: String,
        /// A description of the parse error.
        message: String,
    },

    /// Required server configuration is absent at request time.
    #[error("Server configuration incomplete: missing {missing}")]
    Configuration {
        /// Comma-separated names of the missing settings.
        missing: String,
    },

    /// No employee matches the supplied PIN.
    #[error("No employee matches the supplied PIN")]
    InvalidPin,

    /// The employee exists but is not flagged active.
    #[error("Employee '{employee_id}' is inactive")]
    InactiveEmployee {
        /// The inactive employee's record id.
        employee_id: String,
    },

    /// Clock events are refused on Saturdays and Sundays.
    #[error("Clocking is not allowed on weekends ({date})")]
    WeekendForbidden {
        /// The day the request was made.
        date: NaiveDate,
    },

    /// An arrival time is already recorded for today.
    #[error("Employee '{employee_id}' already clocked in on {date}")]
    AlreadyArrived {
        /// The employee's record id.
        employee_id: String,
        /// The day of the existing arrival.
        date: NaiveDate,
    },

    /// A departure was requested without any attendance row for today.
    #[error("Employee '{employee_id}' has no arrival on {date}")]
    DepartureWithoutArrival {
        /// The employee's record id.
        employee_id: String,
        /// The day of the request.
        date: NaiveDate,
    },

    /// A departure time is already recorded for today.
    #[error("Employee '{employee_id}' already clocked out on {date}")]
    AlreadyDeparted {
        /// The employee's record id.
        employee_id: String,
        /// The day of the existing departure.
        date: NaiveDate,
    },

    /// The record store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A type alias for Results that return PointageError.
pub type PointageResult<T> = Result<T, PointageError>;

/// A type alias for Results that return StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn tuesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 13).unwrap()
    }

    #[test]
    fn test_config_not_found_displays_path() {
        let error = PointageError::ConfigNotFound {
            path: "/missing/pointage.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/pointage.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_source_and_message() {
        let error = PointageError::ConfigParseError {
            source_name: "PORT".to_string(),
            message: "invalid digit found in string".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration 'PORT': invalid digit found in string"
        );
    }

    #[test]
    fn test_upstream_error_displays_status_and_body() {
        let error = StoreError::Upstream {
            operation: "search_employee",
            status: 422,
            body: "INVALID_FILTER_BY_FORMULA".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Record store returned 422 for 'search_employee': INVALID_FILTER_BY_FORMULA"
        );
    }

    #[test]
    fn test_store_error_is_transparent_inside_pointage_error() {
        let error: PointageError = StoreError::Conflict {
            employee_id: "recEMP1".to_string(),
            date: tuesday(),
        }
        .into();
        assert_eq!(
            error.to_string(),
            "Attendance already exists for employee 'recEMP1' on 2026-01-13"
        );
    }

    #[test]
    fn test_already_arrived_displays_employee_and_date() {
        let error = PointageError::AlreadyArrived {
            employee_id: "recEMP1".to_string(),
            date: tuesday(),
        };
        assert_eq!(
            error.to_string(),
            "Employee 'recEMP1' already clocked in on 2026-01-13"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<PointageError>();
        assert_error::<StoreError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_store_error() -> StoreResult<()> {
            Err(StoreError::MissingCredentials {
                missing: "AIRTABLE_API_KEY".to_string(),
            })
        }

        fn propagates_error() -> PointageResult<()> {
            returns_store_error()?;
            Ok(())
        }

        assert!(matches!(
            propagates_error(),
            Err(PointageError::Store(StoreError::MissingCredentials { .. }))
        ));
    }
}
