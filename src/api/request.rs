//! Request types for the pointage API.

use serde::{Deserialize, Deserializer, Serialize};

use crate::models::ClockType;

/// Request body for `POST /api/pointage`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointageRequest {
    /// The employee's PIN. Numbers are accepted and read as their digits.
    #[serde(deserialize_with = "pin_from_text_or_number")]
    pub pin: String,
    /// Arrival or departure.
    #[serde(rename = "type")]
    pub clock_type: ClockType,
}

fn pin_from_text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Pin {
        Text(String),
        Number(u64),
    }

    Ok(match Pin::deserialize(deserializer)? {
        Pin::Text(text) => text,
        Pin::Number(number) => number.to_string(),
    })
}
