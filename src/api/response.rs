//! Response types for the pointage API.
//!
//! Error bodies are `{"error": <message>, "code": <code>}`. Messages are the
//! French texts shown on the clocking terminal; store failures are reduced
//! to an opaque message and logged by the handler instead.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::clock::ClockReceipt;
use crate::error::PointageError;

/// Shown when the store credentials are missing.
pub const MSG_CONFIGURATION: &str = "Configuration serveur manquante";
/// Shown for an unknown PIN.
pub const MSG_INVALID_PIN: &str = "Code PIN incorrect.";
/// Shown for an inactive employee.
pub const MSG_INACTIVE: &str =
    "⚠️ Accès temporairement indisponible.\nVeuillez vous rapprocher du service administratif.";
/// Shown on Saturdays and Sundays.
pub const MSG_WEEKEND: &str = "Le pointage est interdit le week-end (Samedi et Dimanche).";
/// Shown for a repeated arrival.
pub const MSG_ALREADY_ARRIVED: &str = "Arrivée déjà enregistrée aujourd'hui.";
/// Shown for a departure with no arrival.
pub const MSG_NO_ARRIVAL: &str = "Impossible de pointer le départ sans arrivée préalable.";
/// Shown for a repeated departure.
pub const MSG_ALREADY_DEPARTED: &str = "Départ déjà enregistré aujourd'hui.";
/// Shown for any other server-side failure.
pub const MSG_INTERNAL: &str = "Erreur lors du traitement de la demande.";

/// Success body for `POST /api/pointage`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointageResponse {
    /// Always true.
    pub ok: bool,
    /// The employee's display name.
    pub nom: String,
    /// "HH:MM" time that was recorded.
    pub time: String,
}

impl From<ClockReceipt> for PointageResponse {
    fn from(receipt: ClockReceipt) -> Self {
        Self {
            ok: true,
            nom: receipt.name,
            time: receipt.time,
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable error message.
    pub error: String,
    /// Error code for programmatic handling.
    pub code: String,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: code.into(),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    fn new(status: StatusCode, code: &str, message: &str) -> Self {
        Self {
            status,
            error: ApiError::new(code, message),
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<PointageError> for ApiErrorResponse {
    fn from(error: PointageError) -> Self {
        match error {
            PointageError::Configuration { .. }
            | PointageError::ConfigNotFound { .. }
            | PointageError::ConfigParseError { .. } => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
                MSG_CONFIGURATION,
            ),
            PointageError::InvalidPin => {
                Self::new(StatusCode::UNAUTHORIZED, "INVALID_PIN", MSG_INVALID_PIN)
            }
            PointageError::InactiveEmployee { .. } => {
                Self::new(StatusCode::FORBIDDEN, "INACTIVE_EMPLOYEE", MSG_INACTIVE)
            }
            PointageError::WeekendForbidden { .. } => {
                Self::new(StatusCode::FORBIDDEN, "WEEKEND_FORBIDDEN", MSG_WEEKEND)
            }
            PointageError::AlreadyArrived { .. } => Self::new(
                StatusCode::BAD_REQUEST,
                "ALREADY_ARRIVED",
                MSG_ALREADY_ARRIVED,
            ),
            PointageError::DepartureWithoutArrival { .. } => Self::new(
                StatusCode::BAD_REQUEST,
                "DEPARTURE_WITHOUT_ARRIVAL",
                MSG_NO_ARRIVAL,
            ),
            PointageError::AlreadyDeparted { .. } => Self::new(
                StatusCode::BAD_REQUEST,
                "ALREADY_DEPARTED",
                MSG_ALREADY_DEPARTED,
            ),
            PointageError::Store(_) => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORE_ERROR",
                MSG_INTERNAL,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use chrono::NaiveDate;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"error": "Test message", "code": "TEST_ERROR"})
        );
    }

    #[test]
    fn test_success_body_shape() {
        let response = PointageResponse {
            ok: true,
            nom: "Jean".to_string(),
            time: "08:01".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({"ok": true, "nom": "Jean", "time": "08:01"})
        );
    }

    #[test]
    fn test_status_codes() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 17).unwrap();
        let cases = [
            (PointageError::InvalidPin, StatusCode::UNAUTHORIZED),
            (
                PointageError::InactiveEmployee {
                    employee_id: "recEMP1".to_string(),
                },
                StatusCode::FORBIDDEN,
            ),
            (PointageError::WeekendForbidden { date }, StatusCode::FORBIDDEN),
            (
                PointageError::DepartureWithoutArrival {
                    employee_id: "recEMP1".to_string(),
                    date,
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                PointageError::Configuration {
                    missing: "AIRTABLE_API_KEY".to_string(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            let response: ApiErrorResponse = error.into();
            assert_eq!(response.status, expected);
        }
    }

    #[test]
    fn test_config_errors_share_one_response() {
        let errors = [
            PointageError::Configuration {
                missing: "AIRTABLE_BASE_ID".to_string(),
            },
            PointageError::ConfigParseError {
                source_name: "PORT".to_string(),
                message: "invalid digit".to_string(),
            },
        ];

        for error in errors {
            let response: ApiErrorResponse = error.into();
            assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(response.error.code, "CONFIG_ERROR");
            assert_eq!(response.error.error, MSG_CONFIGURATION);
        }
    }

    #[test]
    fn test_store_errors_are_opaque() {
        let error: PointageError = StoreError::Upstream {
            operation: "search_employee",
            status: 401,
            body: "AUTHENTICATION_REQUIRED appSECRET".to_string(),
        }
        .into();

        let response: ApiErrorResponse = error.into();

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.error.error, MSG_INTERNAL);
        assert!(!response.error.error.contains("appSECRET"));
    }

    #[test]
    fn test_configuration_error_does_not_name_secrets() {
        let response: ApiErrorResponse = PointageError::Configuration {
            missing: "AIRTABLE_API_KEY".to_string(),
        }
        .into();
        assert_eq!(response.error.error, MSG_CONFIGURATION);
    }
}
