//! Configuration types for the pointage service.
//!
//! These structures are deserialized from an optional YAML file and then
//! overridden from the environment by the [`ConfigLoader`](super::ConfigLoader).

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Default Airtable REST endpoint.
pub const DEFAULT_API_URL: &str = "https://api.airtable.com/v0";

/// Remote record store settings.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Bearer credential for the store API.
    pub api_key: String,
    /// Identifier of the base holding both tables.
    pub base_id: String,
    /// Name of the employee table.
    pub employees_table: String,
    /// Name of the presence table.
    pub presences_table: String,
    /// Root URL of the store API.
    pub api_url: String,
    /// Timeout applied to every outbound call, in seconds.
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_id: String::new(),
            employees_table: "Employees".to_string(),
            presences_table: "Présences".to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

impl StoreConfig {
    /// Names of the required settings that are empty.
    pub fn missing_settings(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.api_key.is_empty() {
            missing.push("AIRTABLE_API_KEY");
        }
        if self.base_id.is_empty() {
            missing.push("AIRTABLE_BASE_ID");
        }
        missing
    }

    /// Outbound call timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// The API key must never reach the logs.
impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("api_key", &if self.api_key.is_empty() { "" } else { "<redacted>" })
            .field("base_id", &self.base_id)
            .field("employees_table", &self.employees_table)
            .field("presences_table", &self.presences_table)
            .field("api_url", &self.api_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Port to listen on.
    pub port: u16,
    /// Directory served for `GET /` and static assets.
    pub static_dir: PathBuf,
    /// Timeout applied to every inbound request, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            static_dir: PathBuf::from("."),
            request_timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    /// Inbound request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Complete service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Record store settings.
    pub store: StoreConfig,
    /// Listener settings.
    pub server: ServerConfig,
}
