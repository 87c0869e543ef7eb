//! Configuration loading and management for the pointage service.
//!
//! Configuration is an explicit [`AppConfig`] value built once at startup
//! and handed to the store client and the HTTP layer.
//!
//! # Example
//!
//! ```no_run
//! use pointage::config::ConfigLoader;
//!
//! let config = ConfigLoader::load().unwrap();
//! println!("Listening on port {}", config.server.port);
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, CONFIG_PATH_VAR};
pub use types::{AppConfig, ServerConfig, StoreConfig, DEFAULT_API_URL};
