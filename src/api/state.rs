//! Application state for the pointage API.

use std::sync::Arc;

use crate::clock::{Clock, PointageService};
use crate::store::RecordStore;

/// Shared application state.
///
/// Holds the clock service used by every request handler.
#[derive(Clone)]
pub struct AppState {
    service: Arc<PointageService>,
}

impl AppState {
    /// Creates a new application state around a service.
    pub fn new(service: PointageService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Builds the service from its store and time source.
    pub fn from_parts(store: Arc<dyn RecordStore>, clock: Arc<dyn Clock>) -> Self {
        Self::new(PointageService::new(store, clock))
    }

    /// Returns the clock service.
    pub fn service(&self) -> &PointageService {
        &self.service
    }
}
