//! Composition root: wires the production adapters from configuration.
//!
//! The UI shell embedding this crate calls [`App::from_config`] once at
//! startup, starts the session manager, and hands the two services to its
//! views.

use std::sync::Arc;

use thiserror::Error;

use crate::adapters::catalog::FixedTopicCatalog;
use crate::adapters::firestore::{
    FirestoreConfig, FirestoreProfileStore, FirestoreTopicCatalog,
};
use crate::adapters::identity::{FirebaseIdentityConfig, FirebaseIdentityProvider};
use crate::application::{PreferenceEditor, SessionManager};
use crate::config::{AppConfig, CatalogSource, ConfigError};
use crate::ports::{CatalogError, IdentityProvider, TopicCatalog};

/// Failures while assembling the application services.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("catalog file: {0}")]
    Catalog(#[from] CatalogError),
}

/// The assembled application services.
pub struct App {
    pub session_manager: Arc<SessionManager>,
    pub preference_editor: Arc<PreferenceEditor>,
}

impl App {
    /// Validates the configuration and wires the production adapters.
    ///
    /// The identity provider's auth-state channel feeds both the session
    /// manager and the store adapters, so document calls always carry the
    /// current session credential.
    pub fn from_config(config: &AppConfig) -> Result<Self, BootstrapError> {
        config.validate().map_err(ConfigError::from)?;

        let identity = Arc::new(FirebaseIdentityProvider::new(
            FirebaseIdentityConfig::new(config.identity.api_key())
                .with_base_url(&config.identity.base_url)
                .with_timeout(config.identity.timeout()),
        ));

        let mut store_config = FirestoreConfig::new(&config.store.project_id)
            .with_base_url(&config.store.base_url)
            .with_timeout(config.store.timeout());
        store_config.database = config.store.database.clone();
        store_config.users_collection = config.store.users_collection.clone();
        store_config.topics_collection = config.store.topics_collection.clone();

        let profiles = Arc::new(FirestoreProfileStore::new(
            store_config.clone(),
            identity.auth_state(),
        ));

        let catalog: Arc<dyn TopicCatalog> = match config.catalog.source {
            CatalogSource::Fixed => match &config.catalog.file {
                Some(path) => Arc::new(FixedTopicCatalog::from_yaml_file(path)?),
                None => Arc::new(FixedTopicCatalog::builtin()),
            },
            CatalogSource::Store => Arc::new(FirestoreTopicCatalog::new(
                store_config,
                identity.auth_state(),
            )),
        };

        let session_manager = Arc::new(SessionManager::new(
            identity,
            Arc::clone(&profiles) as Arc<dyn crate::ports::ProfileStore>,
        ));
        let preference_editor = Arc::new(PreferenceEditor::new(catalog, profiles));

        Ok(Self {
            session_manager,
            preference_editor,
        })
    }
}
