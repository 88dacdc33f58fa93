//! Firestore-backed topic catalog.
//!
//! The dynamic-catalog variant: topics live as documents in a `topics`
//! collection, one per topic, with `name` and optional `description`
//! fields. Deployments that curate topics in the store use this; the fixed
//! catalog in `adapters::catalog` is the alternative.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tokio::sync::watch;
use tracing::debug;

use crate::domain::preferences::Topic;
use crate::ports::{AuthState, CatalogError, TopicCatalog};

use super::profile_store::{FirestoreConfig, FirestoreDocument};
use super::values::topic_from_document;

/// Response page of a collection listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    #[serde(default)]
    documents: Vec<FirestoreDocument>,
    #[serde(default)]
    next_page_token: Option<String>,
}

/// Lists the `topics` collection from the document store.
pub struct FirestoreTopicCatalog {
    config: FirestoreConfig,
    client: Client,
    auth: watch::Receiver<AuthState>,
}

impl FirestoreTopicCatalog {
    /// Creates a catalog over the same project and auth state as the
    /// profile store.
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

    /// Fetches one listing page.
    async fn fetch_page(&self, page_token: Option<&str>) -> Result<ListResponse, CatalogError> {
        let mut request = self
            .client
            .get(self.config.collection_url(&self.config.topics_collection));
        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }
        // The catalog may be world-readable; attach the session credential
        // only when someone is signed in.
        if let Some(user) = self.auth.borrow().as_ref() {
            request = request.bearer_auth(user.id_token.clone());
        }

        let response = request
            .send()
            .await
            .map_err(|e| CatalogError::unavailable(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            // No collection yet: an empty catalog, not a failure.
            return Ok(ListResponse {
                documents: Vec::new(),
                next_page_token: None,
            });
        }
        if !response.status().is_success() {
            return Err(CatalogError::unavailable(format!(
                "store returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| CatalogError::unavailable(format!("unreadable listing: {}", e)))
    }
}

#[async_trait]
impl TopicCatalog for FirestoreTopicCatalog {
    async fn list(&self) -> Result<Vec<Topic>, CatalogError> {
        let mut topics = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = self.fetch_page(page_token.as_deref()).await?;
            for document in &page.documents {
                match topic_from_document(&document.name, &document.fields) {
                    Ok(topic) => topics.push(topic),
                    Err(err) => debug!(error = %err, "skipping malformed topic document"),
                }
            }
            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        debug!(count = topics.len(), "listed topic catalog");
        Ok(topics)
    }
}
