//! Topic catalog configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where the topic catalog comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    /// The list fixed at startup (built-in or a YAML file).
    Fixed,
    /// The `topics` collection in the document store.
    Store,
}

/// Topic catalog configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Which catalog variant to use
    #[serde(default = "default_source")]
    pub source: CatalogSource,

    /// Optional YAML file overriding the built-in list (fixed source only)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl CatalogConfig {
    /// Validate catalog configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.source == CatalogSource::Store && self.file.is_some() {
            return Err(ValidationError::CatalogFileWithStoreSource);
        }
        Ok(())
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            file: None,
        }
    }
}

fn default_source() -> CatalogSource {
    CatalogSource::Fixed
}
