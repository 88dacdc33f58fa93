//! Firebase identity adapter: email/password credentials over REST.
//!
//! Implements the `IdentityProvider` port against the Firebase Identity
//! Toolkit API (`accounts:signInWithPassword`, `accounts:signUp`). Sign-out
//! is a local operation: the toolkit keeps no server-side session for this
//! flow, so signing out clears the published auth state and discards the id
//! token.
//!
//! # Example
//!
//! ```ignore
//! use daybrief::adapters::identity::{FirebaseIdentityConfig, FirebaseIdentityProvider};
//!
//! let config = FirebaseIdentityConfig::new(api_key);
//! let identity = FirebaseIdentityProvider::new(config);
//! let user = identity.sign_in("alice@example.com", "hunter22").await?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::watch;
use tracing::debug;

use crate::domain::foundation::{AuthenticatedUser, IdentityError, UserId};
use crate::ports::{AuthState, IdentityProvider};

/// Configuration for the Firebase identity adapter.
#[derive(Debug, Clone)]
pub struct FirebaseIdentityConfig {
    /// Web API key identifying the Firebase project.
    api_key: Secret<String>,
    /// Base URL for the Identity Toolkit API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl FirebaseIdentityConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: "https://identitytoolkit.googleapis.com".to_string(),
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

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Response shape shared by the sign-in and sign-up endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CredentialResponse {
    local_id: String,
    email: String,
    id_token: String,
}

/// Error envelope returned by the Identity Toolkit.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Firebase Identity Toolkit provider.
///
/// This is the production implementation of `IdentityProvider`.
pub struct FirebaseIdentityProvider {
    config: FirebaseIdentityConfig,
    client: Client,
    auth: watch::Sender<AuthState>,
}

impl FirebaseIdentityProvider {
    /// Creates a new provider with the given configuration.
    pub fn new(config: FirebaseIdentityConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");
        let (auth, _) = watch::channel(None);

        Self {
            config,
            client,
            auth,
        }
    }

    /// Builds an `accounts:<operation>` endpoint URL.
    fn accounts_url(&self, operation: &str) -> String {
        format!(
            "{}/v1/accounts:{}?key={}",
            self.config.base_url.trim_end_matches('/'),
            operation,
            self.config.api_key()
        )
    }

    /// Posts a credential request and maps the response.
    async fn credential_call(
        &self,
        operation: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, IdentityError> {
        let response = self
            .client
            .post(self.accounts_url(operation))
            .json(&json!({
                "email": email,
                "password": password,
                "returnSecureToken": true,
            }))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    IdentityError::network("request timed out")
                } else if e.is_connect() {
                    IdentityError::network(format!("connection failed: {}", e))
                } else {
                    IdentityError::network(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_error_body(&body));
        }

        let credential: CredentialResponse = response
            .json()
            .await
            .map_err(|e| IdentityError::Other(format!("unreadable credential response: {}", e)))?;

        let user_id = UserId::new(credential.local_id)
            .map_err(|e| IdentityError::Other(format!("bad credential response: {}", e)))?;
        Ok(AuthenticatedUser::new(
            user_id,
            credential.email,
            credential.id_token,
        ))
    }

    /// Publishes a new auth state to observers.
    fn publish(&self, state: AuthState) {
        debug!(signed_in = state.is_some(), "publishing auth state");
        self.auth.send_replace(state);
    }
}

#[async_trait]
impl IdentityProvider for FirebaseIdentityProvider {
    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, IdentityError> {
        let user = self
            .credential_call("signInWithPassword", email, password)
            .await?;
        self.publish(Some(user.clone()));
        Ok(user)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, IdentityError> {
        let user = self.credential_call("signUp", email, password).await?;
        self.publish(Some(user.clone()));
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        self.publish(None);
        Ok(())
    }

    fn auth_state(&self) -> watch::Receiver<AuthState> {
        self.auth.subscribe()
    }
}

/// Maps an Identity Toolkit error body to a domain error.
///
/// The toolkit reports failures as upper-snake codes, sometimes with a
/// trailing explanation after " : " (`WEAK_PASSWORD : Password should be at
/// least 6 characters`).
fn map_error_body(body: &str) -> IdentityError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string());

    let (code, detail) = match message.split_once(" : ") {
        Some((code, detail)) => (code.trim(), Some(detail.trim())),
        None => (message.trim(), None),
    };

    match code {
        "EMAIL_EXISTS" => IdentityError::EmailAlreadyInUse,
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            IdentityError::InvalidCredentials
        }
        "WEAK_PASSWORD" => IdentityError::WeakPassword(
            detail
                .unwrap_or("Password should be at least 6 characters")
                .to_string(),
        ),
        other => IdentityError::Other(other.to_string()),
    }
}
