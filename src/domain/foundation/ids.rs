//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Unique identifier for a user, as issued by the identity service.
///
/// The identity service owns the format (an opaque string); the only local
/// invariant is non-emptiness, since an empty id would address the wrong
/// document path in the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a new UserId, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::empty_field("user_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a newsletter topic.
///
/// Topic ids double as document ids in the `topics` collection, so they may
/// not be empty or contain a path separator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicId(String);

impl TopicId {
    /// Creates a new TopicId, validating it is usable as a document id.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::empty_field("topic_id"));
        }
        if id.contains('/') {
            return Err(ValidationError::invalid_format("topic_id", "contains '/'"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_accepts_non_empty_string() {
        let id = UserId::new("uid-abc123").unwrap();
        assert_eq!(id.as_str(), "uid-abc123");
    }

    #[test]
    fn user_id_rejects_empty_string() {
        assert!(UserId::new("").is_err());
    }

    #[test]
    fn topic_id_accepts_slug() {
        let id = TopicId::new("science").unwrap();
        assert_eq!(id.to_string(), "science");
    }

    #[test]
    fn topic_id_rejects_empty_string() {
        assert!(TopicId::new("").is_err());
    }

    #[test]
    fn topic_id_rejects_path_separator() {
        assert!(TopicId::new("news/science").is_err());
    }

    #[test]
    fn topic_id_orders_lexicographically() {
        let a = TopicId::new("ai").unwrap();
        let b = TopicId::new("science").unwrap();
        assert!(a < b);
    }

    #[test]
    fn ids_serialize_transparently() {
        let id = TopicId::new("science").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"science\"");
    }
}
