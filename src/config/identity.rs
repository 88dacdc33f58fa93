//! Identity service configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Identity service configuration (Firebase Identity Toolkit)
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    /// Web API key identifying the project
    pub api_key: Secret<String>,

    /// Base URL of the identity API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl IdentityConfig {
    /// Get the request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Expose the API key for adapter wiring
    pub(crate) fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Validate identity configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired(
                "DAYBRIEF__IDENTITY__API_KEY",
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    "https://identitytoolkit.googleapis.com".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> IdentityConfig {
        IdentityConfig {
            api_key: Secret::new("test-api-key".to_string()),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }

    #[test]
    fn test_timeout_duration() {
        let config = IdentityConfig {
            timeout_secs: 30,
            ..minimal()
        };
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_validation_missing_api_key() {
        let config = IdentityConfig {
            api_key: Secret::new(String::new()),
            ..minimal()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let config = IdentityConfig {
            timeout_secs: 0,
            ..minimal()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidTimeout)
        ));
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(minimal().validate().is_ok());
    }

    #[test]
    fn test_api_key_is_redacted_in_debug_output() {
        let rendered = format!("{:?}", minimal());
        assert!(!rendered.contains("test-api-key"));
    }
}
