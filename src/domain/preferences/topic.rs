//! Newsletter topic offered to every subscriber.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::TopicId;

/// One entry of the topic catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    /// Stable identifier, also the document id in the store-backed catalog.
    pub id: TopicId,

    /// Display name shown next to the checkbox.
    pub name: String,

    /// Optional one-line blurb shown after the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Topic {
    /// Creates a topic with a description.
    pub fn new(
        id: TopicId,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: Some(description.into()),
        }
    }

    /// Creates a topic without a description.
    pub fn bare(id: TopicId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
        }
    }
}
