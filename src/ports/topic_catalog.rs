//! TopicCatalog port: where the offered topics come from.
//!
//! The catalog source is deliberately pluggable. Deployments can ship the
//! fixed curated list or read a `topics` collection from the document store;
//! the preference editor does not care which.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::preferences::Topic;

/// Catalog lookup failures.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    /// The backing source could not be reached or read.
    #[error("Topic catalog unavailable: {0}")]
    Unavailable(String),
}

impl CatalogError {
    /// Creates an unavailable error with a message.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}

/// The set of topics offered to every user.
#[async_trait]
pub trait TopicCatalog: Send + Sync {
    /// Lists the catalog in display order.
    async fn list(&self) -> Result<Vec<Topic>, CatalogError>;
}
