//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment
//! variables using the `config` and `dotenvy` crates. Configuration is
//! loaded with the `DAYBRIEF_` prefix and nested values use double
//! underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use daybrief::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod catalog;
mod error;
mod identity;
mod store;

pub use catalog::{CatalogConfig, CatalogSource};
pub use error::{ConfigError, ValidationError};
pub use identity::IdentityConfig;
pub use store::StoreConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Contains all configuration sections for the Daybrief core. Load using
/// [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Identity service configuration (credential API)
    pub identity: IdentityConfig,

    /// Document store configuration (profile documents, dynamic catalog)
    pub store: StoreConfig,

    /// Topic catalog configuration
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `DAYBRIEF` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `DAYBRIEF__IDENTITY__API_KEY=...` -> `identity.api_key = ...`
    /// - `DAYBRIEF__STORE__PROJECT_ID=...` -> `store.project_id = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("DAYBRIEF")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.identity.validate()?;
        self.store.validate()?;
        self.catalog.validate()?;
        Ok(())
    }
}
