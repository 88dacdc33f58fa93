//! In-memory profile store adapter.
//!
//! Stores profile documents in a map. Useful for testing and development.

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock as StdRwLock;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{TopicId, UserId};
use crate::domain::preferences::UserProfile;
use crate::ports::{ProfileStore, StoreError};

/// In-memory storage for profile documents.
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<UserId, UserProfile>>,
    force_error: StdRwLock<Option<StoreError>>,
    find_calls: AtomicUsize,
    create_calls: AtomicUsize,
    save_topics_calls: AtomicUsize,
}

impl InMemoryProfileStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a profile document.
    pub fn with_profile(self, user_id: UserId, profile: UserProfile) -> Self {
        self.profiles
            .try_write()
            .expect("store not yet shared")
            .insert(user_id, profile);
        self
    }

    /// Forces all operations to return the specified error.
    pub fn with_error(self, error: StoreError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }

    /// Clears the forced error and returns to normal operation.
    pub fn clear_error(&self) {
        *self.force_error.write().unwrap() = None;
    }

    /// Number of stored profile documents.
    pub async fn profile_count(&self) -> usize {
        self.profiles.read().await.len()
    }

    /// Number of `find` calls observed.
    pub fn find_calls(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }

    /// Number of `create` calls observed.
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// Number of `save_topics` calls observed.
    pub fn save_topics_calls(&self) -> usize {
        self.save_topics_calls.load(Ordering::SeqCst)
    }

    fn forced_error(&self) -> Option<StoreError> {
        self.force_error.read().unwrap().clone()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn find(&self, user_id: &UserId) -> Result<Option<UserProfile>, StoreError> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = self.forced_error() {
            return Err(error);
        }

        Ok(self.profiles.read().await.get(user_id).cloned())
    }

    async fn create(&self, user_id: &UserId, profile: &UserProfile) -> Result<(), StoreError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = self.forced_error() {
            return Err(error);
        }

        self.profiles
            .write()
            .await
            .insert(user_id.clone(), profile.clone());
        Ok(())
    }

    async fn save_topics(
        &self,
        user_id: &UserId,
        topics: &BTreeSet<TopicId>,
    ) -> Result<(), StoreError> {
        self.save_topics_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = self.forced_error() {
            return Err(error);
        }

        match self.profiles.write().await.get_mut(user_id) {
            Some(profile) => {
                profile.topics = topics.clone();
                Ok(())
            }
            // The real store rejects a partial update on a missing document.
            None => Err(StoreError::Other(format!(
                "No document to update: {}",
                user_id
            ))),
        }
    }
}
