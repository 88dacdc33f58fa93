//! Fixed topic catalog.
//!
//! The enumerated-list variant: the catalog ships with the application,
//! either the built-in list below or a YAML file curated per deployment.

use std::path::Path;

use async_trait::async_trait;
use once_cell::sync::Lazy;

use crate::domain::foundation::TopicId;
use crate::domain::preferences::Topic;
use crate::ports::{CatalogError, TopicCatalog};

/// The topics every Daybrief deployment offers out of the box.
static BUILTIN_TOPICS: Lazy<Vec<Topic>> = Lazy::new(|| {
    let topic = |id: &str, name: &str, description: &str| {
        Topic::new(TopicId::new(id).expect("valid builtin topic id"), name, description)
    };
    vec![
        topic("ai", "AI & Machine Learning", "Model releases, research, and industry moves"),
        topic("science", "Science", "Discoveries and research worth knowing"),
        topic("technology", "Technology", "Hardware, software, and the companies behind them"),
        topic("business", "Business", "Markets, startups, and strategy"),
        topic("health", "Health", "Medicine, healthcare, and wellbeing"),
        topic("climate", "Climate", "Energy transition and the changing planet"),
    ]
});

/// Catalog backed by a list fixed at startup.
#[derive(Debug, Clone)]
pub struct FixedTopicCatalog {
    topics: Vec<Topic>,
}

impl FixedTopicCatalog {
    /// Creates a catalog from an explicit list.
    pub fn new(topics: Vec<Topic>) -> Self {
        Self { topics }
    }

    /// The built-in curated list.
    pub fn builtin() -> Self {
        Self::new(BUILTIN_TOPICS.clone())
    }

    /// Loads a curated list from a YAML file.
    ///
    /// The file is a sequence of topics:
    ///
    /// ```yaml
    /// - id: science
    ///   name: Science
    ///   description: Discoveries and research worth knowing
    /// - id: climate
    ///   name: Climate
    /// ```
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::unavailable(format!("{}: {}", path.display(), e)))?;
        let topics: Vec<Topic> = serde_yaml::from_str(&raw)
            .map_err(|e| CatalogError::unavailable(format!("{}: {}", path.display(), e)))?;
        Ok(Self::new(topics))
    }
}

impl Default for FixedTopicCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[async_trait]
impl TopicCatalog for FixedTopicCatalog {
    async fn list(&self) -> Result<Vec<Topic>, CatalogError> {
        Ok(self.topics.clone())
    }
}
