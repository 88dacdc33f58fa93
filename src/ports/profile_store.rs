//! ProfileStore port for the per-user profile document.

use std::collections::BTreeSet;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{TopicId, UserId};
use crate::domain::preferences::UserProfile;

/// Document-store failures, from the application's perspective.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The store rejected the caller's credential for this document.
    #[error("Permission denied")]
    PermissionDenied,

    /// The store could not be reached.
    #[error("Document store unreachable: {0}")]
    Network(String),

    /// A document arrived in a shape the crate cannot read.
    #[error("Malformed document: {0}")]
    Malformed(String),

    /// Any other store failure, carrying the service's message.
    #[error("{0}")]
    Other(String),
}

impl StoreError {
    /// Creates a network error with a message.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a malformed-document error with a message.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }
}

/// The user's profile document in the external store.
///
/// # Contract
///
/// Implementations must:
/// - Return `Ok(None)` from `find` when the document does not exist;
///   absence is empty state, never an error
/// - Write the full document on `create` (email, creation time, topic set)
/// - Replace only the `topics` field on `save_topics`, leaving the other
///   fields untouched; the write is last-write-wins with no merge against
///   concurrent edits from other sessions
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetches the profile document for a user, if one exists.
    async fn find(&self, user_id: &UserId) -> Result<Option<UserProfile>, StoreError>;

    /// Creates the profile document for a user.
    async fn create(&self, user_id: &UserId, profile: &UserProfile) -> Result<(), StoreError>;

    /// Replaces the user's subscribed topic set, and nothing else.
    async fn save_topics(
        &self,
        user_id: &UserId,
        topics: &BTreeSet<TopicId>,
    ) -> Result<(), StoreError>;
}
