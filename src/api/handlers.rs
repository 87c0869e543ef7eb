//! HTTP request handlers for the pointage API.
//!
//! This module contains the handler functions for all API endpoints and the
//! router that also serves the terminal's static page.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    services::{ServeDir, ServeFile},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::error::PointageError;

use super::request::PointageRequest;
use super::response::{ApiError, ApiErrorResponse, PointageResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/pointage", post(pointage_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Creates the full application: API routes, `index.html` on `/`, static
/// files from the configured directory, request tracing and timeout.
pub fn create_app(state: AppState, server: &ServerConfig) -> Router {
    let index = server.static_dir.join("index.html");

    create_router(state)
        .route_service("/", ServeFile::new(index))
        .fallback_service(ServeDir::new(&server.static_dir))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            server.request_timeout(),
        ))
        .layer(TraceLayer::new_for_http())
}

/// Handler for GET /health.
async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Handler for POST /api/pointage.
///
/// Records an arrival or departure for the employee owning the PIN.
async fn pointage_handler(
    State(state): State<AppState>,
    payload: Result<Json<PointageRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    ApiError::validation_error(format!("Requête invalide : {}", body_text))
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("JSON invalide : {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => ApiError::new(
                    "MISSING_CONTENT_TYPE",
                    "Le Content-Type doit être application/json.",
                ),
                _ => ApiError::malformed_json("Impossible de lire le corps de la requête."),
            };
            return (StatusCode::BAD_REQUEST, Json(error)).into_response();
        }
    };

    info!(
        correlation_id = %correlation_id,
        clock_type = %request.clock_type,
        "Processing clock event"
    );

    match state
        .service()
        .clock(&request.pin, request.clock_type)
        .await
    {
        Ok(receipt) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %receipt.employee_id,
                record_id = %receipt.record_id,
                "Clock event accepted"
            );
            (StatusCode::OK, Json(PointageResponse::from(receipt))).into_response()
        }
        Err(err) => {
            log_rejection(correlation_id, &err);
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Server-side faults are logged with full detail; the client only ever
/// sees the opaque message from [`ApiErrorResponse`].
fn log_rejection(correlation_id: Uuid, err: &PointageError) {
    match err {
        PointageError::Store(_)
        | PointageError::Configuration { .. }
        | PointageError::ConfigNotFound { .. }
        | PointageError::ConfigParseError { .. } => {
            error!(correlation_id = %correlation_id, error = %err, "Clock event failed")
        }
        _ => warn!(correlation_id = %correlation_id, error = %err, "Clock event rejected"),
    }
}
