//! Firestore profile-store adapter.
//!
//! Implements the `ProfileStore` port against the Firestore REST API. Each
//! user owns one document in the `users` collection, addressed by user id.
//! Requests run with the signed-in user's id token as the Bearer credential,
//! sourced live from the identity provider's auth-state channel, the same
//! way the vendor SDK attaches the current session to store calls.

use std::collections::BTreeSet;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tokio::sync::watch;
use tracing::debug;

use crate::domain::foundation::{TopicId, UserId};
use crate::domain::preferences::UserProfile;
use crate::ports::{AuthState, ProfileStore, StoreError};

use super::values::{profile_fields, profile_from_fields, topics_fields};

/// Configuration for the Firestore adapters.
#[derive(Debug, Clone)]
pub struct FirestoreConfig {
    /// Project the database belongs to.
    pub project_id: String,
    /// Base URL for the Firestore API.
    pub base_url: String,
    /// Database id within the project.
    pub database: String,
    /// Collection holding one profile document per user.
    pub users_collection: String,
    /// Collection holding the dynamic topic catalog.
    pub topics_collection: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl FirestoreConfig {
    /// Creates a configuration for the given project with default naming.
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            base_url: "https://firestore.googleapis.com".to_string(),
            database: "(default)".to_string(),
            users_collection: "users".to_string(),
            topics_collection: "topics".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Sets the base URL (for emulators and tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// URL of one document in a collection.
    pub(crate) fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}", self.collection_url(collection), id)
    }

    /// URL of a whole collection.
    pub(crate) fn collection_url(&self, collection: &str) -> String {
        format!(
            "{}/v1/projects/{}/databases/{}/documents/{}",
            self.base_url.trim_end_matches('/'),
            self.project_id,
            self.database,
            collection
        )
    }
}

/// One document as the API returns it.
#[derive(Debug, Deserialize)]
pub(crate) struct FirestoreDocument {
    #[serde(default)]
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) fields: Map<String, Value>,
}

/// Firestore-backed profile store.
///
/// This is the production implementation of `ProfileStore`.
pub struct FirestoreProfileStore {
    config: FirestoreConfig,
    client: Client,
    auth: watch::Receiver<AuthState>,
}

impl FirestoreProfileStore {
    /// Creates a store that authorizes requests with the auth state
    /// published by the identity provider.
    pub fn new(config: FirestoreConfig, auth: watch::Receiver<AuthState>) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            client,
            auth,
        }
    }

    /// The current user's id token. Refused locally when nobody is signed
    /// in; the store would reject the request anyway.
    fn bearer(&self) -> Result<String, StoreError> {
        self.auth
            .borrow()
            .as_ref()
            .map(|user| user.id_token.clone())
            .ok_or(StoreError::PermissionDenied)
    }

    fn user_document_url(&self, user_id: &UserId) -> String {
        self.config
            .document_url(&self.config.users_collection, user_id.as_str())
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response, StoreError> {
        request
            .bearer_auth(self.bearer()?)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    StoreError::network("request timed out")
                } else if e.is_connect() {
                    StoreError::network(format!("connection failed: {}", e))
                } else {
                    StoreError::network(e.to_string())
                }
            })
    }
}

/// Maps a non-success store response to an error.
async fn error_from_response(response: Response) -> StoreError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StoreError::PermissionDenied,
        _ => StoreError::Other(format!("store returned {}: {}", status, body.trim())),
    }
}

#[async_trait]
impl ProfileStore for FirestoreProfileStore {
    async fn find(&self, user_id: &UserId) -> Result<Option<UserProfile>, StoreError> {
        let url = self.user_document_url(user_id);
        debug!(user = %user_id, "fetching profile document");

        let response = self.send(self.client.get(url)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let document: FirestoreDocument = response
            .json()
            .await
            .map_err(|e| StoreError::malformed(format!("unreadable document: {}", e)))?;
        profile_from_fields(&document.fields).map(Some)
    }

    async fn create(&self, user_id: &UserId, profile: &UserProfile) -> Result<(), StoreError> {
        let url = self.user_document_url(user_id);
        debug!(user = %user_id, "creating profile document");

        let response = self
            .send(
                self.client
                    .patch(url)
                    .json(&json!({ "fields": profile_fields(profile) })),
            )
            .await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(())
    }

    async fn save_topics(
        &self,
        user_id: &UserId,
        topics: &BTreeSet<TopicId>,
    ) -> Result<(), StoreError> {
        // The field mask restricts the write to `topics`, leaving email and
        // createdAt untouched.
        let url = format!(
            "{}?updateMask.fieldPaths=topics",
            self.user_document_url(user_id)
        );
        debug!(user = %user_id, count = topics.len(), "saving topics");

        let response = self
            .send(
                self.client
                    .patch(url)
                    .json(&json!({ "fields": topics_fields(topics) })),
            )
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::Other(format!(
                "No document to update: {}",
                user_id
            )));
        }
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{AuthenticatedUser, UserId};

    fn config() -> FirestoreConfig {
        FirestoreConfig::new("daybrief-prod")
    }

    // A receiver keeps serving its last value after the sender drops.
    fn signed_out_channel() -> watch::Receiver<AuthState> {
        watch::channel(None).1
    }

    fn signed_in_channel(token: &str) -> watch::Receiver<AuthState> {
        let user = AuthenticatedUser::new(
            UserId::new("uid-alice").unwrap(),
            "alice@example.com",
            token,
        );
        watch::channel(Some(user)).1
    }

    #[test]
    fn document_url_addresses_the_users_collection() {
        let store = FirestoreProfileStore::new(config(), signed_out_channel());

        let url = store.user_document_url(&UserId::new("uid-alice").unwrap());

        assert_eq!(
            url,
            "https://firestore.googleapis.com/v1/projects/daybrief-prod/databases/(default)/documents/users/uid-alice"
        );
    }

    #[test]
    fn bearer_refuses_when_signed_out() {
        let store = FirestoreProfileStore::new(config(), signed_out_channel());

        assert!(matches!(
            store.bearer(),
            Err(StoreError::PermissionDenied)
        ));
    }

    #[test]
    fn bearer_uses_the_current_id_token() {
        let store = FirestoreProfileStore::new(config(), signed_in_channel("tok-abc"));

        assert_eq!(store.bearer().unwrap(), "tok-abc");
    }

    #[test]
    fn bearer_tracks_auth_state_changes() {
        let user = AuthenticatedUser::new(
            UserId::new("uid-alice").unwrap(),
            "alice@example.com",
            "tok-1",
        );
        let (tx, rx) = watch::channel(Some(user.clone()));
        let store = FirestoreProfileStore::new(config(), rx);
        assert_eq!(store.bearer().unwrap(), "tok-1");

        tx.send_replace(Some(AuthenticatedUser::new(
            user.id.clone(),
            user.email.clone(),
            "tok-2",
        )));

        assert_eq!(store.bearer().unwrap(), "tok-2");
    }

    #[test]
    fn firestore_document_deserializes_with_missing_fields() {
        let doc: FirestoreDocument = serde_json::from_str(r#"{"name":"x"}"#).unwrap();
        assert!(doc.fields.is_empty());
    }
}
