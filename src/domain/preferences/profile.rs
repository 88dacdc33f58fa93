//! Per-user profile document, keyed by user id in the `users` collection.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, TopicId};

/// The one profile document a user owns in the store.
///
/// Created exactly once, at first successful authentication, with an empty
/// topic set; existence is checked before creation. The `topics` field is
/// replaced wholesale on every preference save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Email the account was created with.
    pub email: String,

    /// When the profile document was first created.
    pub created_at: Timestamp,

    /// Topic ids the user subscribed to. Should be a subset of the catalog,
    /// though nothing enforces that.
    #[serde(default)]
    pub topics: BTreeSet<TopicId>,
}

impl UserProfile {
    /// Creates a fresh profile with no topics selected.
    pub fn new(email: impl Into<String>, created_at: Timestamp) -> Self {
        Self {
            email: email.into(),
            created_at,
            topics: BTreeSet::new(),
        }
    }

    /// Replaces the subscribed topic set.
    pub fn with_topics(mut self, topics: BTreeSet<TopicId>) -> Self {
        self.topics = topics;
        self
    }
}
