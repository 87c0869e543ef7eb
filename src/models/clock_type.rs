//! Clock event types.

use serde::{Deserialize, Serialize};

/// The kind of clock event an employee submits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClockType {
    /// Clock-in ("arrivée").
    #[serde(rename = "arrivee")]
    Arrival,
    /// Clock-out ("départ").
    #[serde(rename = "depart")]
    Departure,
}

impl std::fmt::Display for ClockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClockType::Arrival => write!(f, "arrivee"),
            ClockType::Departure => write!(f, "depart"),
        }
    }
}
