//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type, which reads an optional
//! YAML file and then applies environment variable overrides.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::{PointageError, PointageResult};

use super::types::{AppConfig, StoreConfig};

/// Variable naming an optional YAML configuration file.
pub const CONFIG_PATH_VAR: &str = "POINTAGE_CONFIG";

/// Loads the service configuration.
///
/// Settings are resolved in this order, later sources winning:
/// built-in defaults, the YAML file named by `POINTAGE_CONFIG`, then
/// individual environment variables. Blank variables are ignored and
/// values are trimmed.
///
/// # Example
///
/// ```
/// use pointage::config::ConfigLoader;
///
/// let config = ConfigLoader::load_with(|key| match key {
///     "AIRTABLE_BASE_ID" => Some(" appXYZ ".to_string()),
///     "PORT" => Some("8080".to_string()),
///     _ => None,
/// })?;
/// assert_eq!(config.store.base_id, "appXYZ");
/// assert_eq!(config.server.port, 8080);
/// # Ok::<(), pointage::error::PointageError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration from the process environment, reading `.env` first.
    pub fn load() -> PointageResult<AppConfig> {
        dotenvy::dotenv().ok();
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Loads configuration from an arbitrary variable lookup.
    pub fn load_with<F>(lookup: F) -> PointageResult<AppConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = match var(CONFIG_PATH_VAR) {
            Some(path) => Self::load_file(path)?,
            None => AppConfig::default(),
        };

        let store = &mut config.store;
        if let Some(value) = var("AIRTABLE_API_KEY") {
            store.api_key = value;
        }
        if let Some(value) = var("AIRTABLE_BASE_ID") {
            store.base_id = value;
        }
        if let Some(value) = var("AIRTABLE_TABLE_EMPLOYEES") {
            store.employees_table = value;
        }
        if let Some(value) = var("AIRTABLE_TABLE_PRESENCES") {
            store.presences_table = value;
        }
        if let Some(value) = var("AIRTABLE_API_URL") {
            store.api_url = value;
        }
        if let Some(value) = var("AIRTABLE_TIMEOUT_SECS") {
            store.timeout_secs = parse_var("AIRTABLE_TIMEOUT_SECS", &value)?;
        }

        let server = &mut config.server;
        if let Some(value) = var("PORT") {
            server.port = parse_var("PORT", &value)?;
        }
        if let Some(value) = var("STATIC_DIR") {
            server.static_dir = value.into();
        }
        if let Some(value) = var("REQUEST_TIMEOUT_SECS") {
            server.request_timeout_secs = parse_var("REQUEST_TIMEOUT_SECS", &value)?;
        }

        Ok(config)
    }

    /// Loads and parses a YAML configuration file.
    pub fn load_file<P: AsRef<Path>>(path: P) -> PointageResult<AppConfig> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PointageError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let mut config: AppConfig =
            serde_yaml::from_str(&content).map_err(|e| PointageError::ConfigParseError {
                source_name: path_str,
                message: e.to_string(),
            })?;
        tidy_store(&mut config.store);
        Ok(config)
    }
}

/// Trims file-sourced store settings; blank ones fall back to defaults.
fn tidy_store(store: &mut StoreConfig) {
    let defaults = StoreConfig::default();
    tidy(&mut store.api_key, &defaults.api_key);
    tidy(&mut store.base_id, &defaults.base_id);
    tidy(&mut store.employees_table, &defaults.employees_table);
    tidy(&mut store.presences_table, &defaults.presences_table);
    tidy(&mut store.api_url, &defaults.api_url);
}

fn tidy(value: &mut String, default: &str) {
    let trimmed = value.trim();
    *value = if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    };
}

fn parse_var<T>(key: &str, value: &str) -> PointageResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| PointageError::ConfigParseError {
        source_name: key.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use std::path::PathBuf;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_empty_environment_yields_defaults() {
        let config = ConfigLoader::load_with(lookup_from(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_environment_values_are_trimmed() {
        let config = ConfigLoader::load_with(lookup_from(&[
            ("AIRTABLE_API_KEY", "  patKEY \n"),
            ("AIRTABLE_BASE_ID", "appBASE "),
            ("AIRTABLE_TABLE_PRESENCES", " Pointages "),
        ]))
        .unwrap();
        assert_eq!(config.store.api_key, "patKEY");
        assert_eq!(config.store.base_id, "appBASE");
        assert_eq!(config.store.presences_table, "Pointages");
        assert!(config.store.missing_settings().is_empty());
    }

    #[test]
    fn test_blank_table_name_falls_back_to_default() {
        let config =
            ConfigLoader::load_with(lookup_from(&[("AIRTABLE_TABLE_EMPLOYEES", "   ")])).unwrap();
        assert_eq!(config.store.employees_table, "Employees");
    }

    #[test]
    fn test_invalid_port_is_a_parse_error() {
        let result = ConfigLoader::load_with(lookup_from(&[("PORT", "http")]));
        match result {
            Err(PointageError::ConfigParseError { source_name, .. }) => {
                assert_eq!(source_name, "PORT")
            }
            other => panic!("expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_config_file() {
        let result = ConfigLoader::load_with(lookup_from(&[(
            CONFIG_PATH_VAR,
            "/nonexistent/pointage.yaml",
        )]));
        assert!(matches!(result, Err(PointageError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_environment_overrides_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "store:\n  base_id: appFILE\n  presences_table: Registre\nserver:\n  port: 4000\n  static_dir: public"
        )
        .unwrap();
        let path = file.path().display().to_string();

        let config = ConfigLoader::load_with(lookup_from(&[
            (CONFIG_PATH_VAR, path.as_str()),
            ("PORT", "5000"),
        ]))
        .unwrap();

        assert_eq!(config.store.base_id, "appFILE");
        assert_eq!(config.store.presences_table, "Registre");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.static_dir, PathBuf::from("public"));
    }

    #[test]
    fn test_yaml_values_are_trimmed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "store:\n  api_key: \" \"\n  base_id: \" appFILE \"\n  presences_table: \"  \""
        )
        .unwrap();

        let config = ConfigLoader::load_file(file.path()).unwrap();

        assert_eq!(config.store.api_key, "");
        assert_eq!(config.store.base_id, "appFILE");
        assert_eq!(config.store.presences_table, "Présences");
        assert_eq!(config.store.missing_settings(), vec!["AIRTABLE_API_KEY"]);
    }

    #[test]
    fn test_malformed_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server:\n  port: [not a number]").unwrap();

        let result = ConfigLoader::load_file(file.path());
        assert!(matches!(
            result,
            Err(PointageError::ConfigParseError { .. })
        ));
    }
}
