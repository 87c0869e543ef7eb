//! HTTP API module for the pointage service.
//!
//! This module provides the `POST /api/pointage` endpoint used by the
//! clocking terminal, plus health and static file routes.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{create_app, create_router};
pub use request::PointageRequest;
pub use response::{ApiError, ApiErrorResponse, PointageResponse};
pub use state::AppState;
