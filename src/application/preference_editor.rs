//! PreferenceEditor - loads, edits, and saves the user's topic selection.
//!
//! The editor only ever runs for an authenticated user: with nobody signed
//! in there is nothing to load and the settings view renders nothing. A
//! missing profile document is empty state, not an error.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;
use tracing::{error, info};

use crate::domain::foundation::UserId;
use crate::domain::preferences::TopicSelection;
use crate::ports::{CatalogError, ProfileStore, StoreError, TopicCatalog};

/// How long a save outcome stays on screen before it clears itself.
pub const FEEDBACK_DISPLAY: Duration = Duration::from_secs(2);

/// Transient outcome banner shown after a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveFeedback {
    Saved,
    Failed,
}

impl SaveFeedback {
    /// The product copy rendered for this outcome.
    pub fn message(&self) -> &'static str {
        match self {
            SaveFeedback::Saved => "Preferences saved!",
            SaveFeedback::Failed => "Failed to save preferences.",
        }
    }
}

/// Failures while loading the editor. Save failures are not errors at this
/// boundary; they surface as [`SaveFeedback::Failed`].
#[derive(Debug, Clone, Error)]
pub enum PreferenceError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Edits one user's topic subscription set.
pub struct PreferenceEditor {
    catalog: Arc<dyn TopicCatalog>,
    profiles: Arc<dyn ProfileStore>,
    feedback: watch::Sender<Option<SaveFeedback>>,
}

impl PreferenceEditor {
    /// Creates an editor over the given catalog and profile store.
    pub fn new(catalog: Arc<dyn TopicCatalog>, profiles: Arc<dyn ProfileStore>) -> Self {
        let (feedback, _) = watch::channel(None);
        Self {
            catalog,
            profiles,
            feedback,
        }
    }

    /// Fetches the catalog and the user's saved topics, producing the
    /// selection to edit.
    ///
    /// The two reads run concurrently. A user with no profile document (or
    /// one saved before topics existed) starts from an empty selection.
    pub async fn load(&self, user_id: &UserId) -> Result<TopicSelection, PreferenceError> {
        let (catalog, profile) = tokio::join!(self.catalog.list(), self.profiles.find(user_id));

        let catalog = catalog?;
        let selected = profile?.map(|p| p.topics).unwrap_or_default();

        info!(user = %user_id, topics = catalog.len(), "loaded topic selection");
        Ok(TopicSelection::new(catalog, selected))
    }

    /// Writes the selection as the user's new topic set, replacing whatever
    /// was saved before (last write wins; concurrent edits are not merged).
    ///
    /// Returns true on success. Either way a [`SaveFeedback`] is published
    /// and scheduled to clear after [`FEEDBACK_DISPLAY`], unconditionally.
    /// Failures are not retried.
    pub async fn save(&self, user_id: &UserId, selection: &TopicSelection) -> bool {
        let outcome = match self.profiles.save_topics(user_id, selection.selected()).await {
            Ok(()) => {
                info!(user = %user_id, count = selection.selected().len(), "saved topics");
                SaveFeedback::Saved
            }
            Err(err) => {
                error!(user = %user_id, error = %err, "saving topics failed");
                SaveFeedback::Failed
            }
        };

        self.feedback.send_replace(Some(outcome));

        let feedback = self.feedback.clone();
        tokio::spawn(async move {
            tokio::time::sleep(FEEDBACK_DISPLAY).await;
            feedback.send_replace(None);
        });

        outcome == SaveFeedback::Saved
    }

    /// Subscribes to the transient save-outcome banner.
    pub fn feedback(&self) -> watch::Receiver<Option<SaveFeedback>> {
        self.feedback.subscribe()
    }
}
