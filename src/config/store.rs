//! Document store configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Document store configuration (Firestore)
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Project the database belongs to
    pub project_id: String,

    /// Base URL of the document store API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Database id within the project
    #[serde(default = "default_database")]
    pub database: String,

    /// Collection holding one profile document per user
    #[serde(default = "default_users_collection")]
    pub users_collection: String,

    /// Collection holding the dynamic topic catalog
    #[serde(default = "default_topics_collection")]
    pub topics_collection: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl StoreConfig {
    /// Get the request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate store configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.project_id.is_empty() {
            return Err(ValidationError::MissingRequired(
                "DAYBRIEF__STORE__PROJECT_ID",
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    "https://firestore.googleapis.com".to_string()
}

fn default_database() -> String {
    "(default)".to_string()
}

fn default_users_collection() -> String {
    "users".to_string()
}

fn default_topics_collection() -> String {
    "topics".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}
