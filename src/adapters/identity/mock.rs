//! Mock identity adapter for testing.
//!
//! Implements the `IdentityProvider` port against an in-memory account
//! table, avoiding the need for the real identity service. Notification
//! behavior matches the real adapter: every successful call publishes a new
//! auth state. Silent mode suppresses that, so tests can deliver the
//! notification by hand and exercise both arrival orders.
//!
//! # Example
//!
//! ```ignore
//! use daybrief::adapters::identity::MockIdentityProvider;
//!
//! let identity = MockIdentityProvider::new()
//!     .with_account("alice@example.com", "hunter22");
//!
//! let user = identity.sign_in("alice@example.com", "hunter22").await?;
//! assert_eq!(user.email, "alice@example.com");
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use tokio::sync::watch;
use uuid::Uuid;

use crate::domain::foundation::{AuthenticatedUser, IdentityError, UserId};
use crate::ports::{AuthState, IdentityProvider};

/// One registered credential.
#[derive(Debug, Clone)]
struct MockAccount {
    uid: String,
    password: String,
}

/// Mock identity provider for testing.
///
/// Unknown emails and wrong passwords return `InvalidCredentials`; taken
/// emails return `EmailAlreadyInUse`; passwords under six characters are
/// rejected as weak, like the real service.
pub struct MockIdentityProvider {
    accounts: RwLock<HashMap<String, MockAccount>>,
    current: RwLock<Option<AuthenticatedUser>>,
    auth: watch::Sender<AuthState>,
    silent: bool,
    force_error: RwLock<Option<IdentityError>>,
    sign_in_calls: AtomicUsize,
    sign_up_calls: AtomicUsize,
    sign_out_calls: AtomicUsize,
}

impl MockIdentityProvider {
    /// Creates a provider with no accounts and nobody signed in.
    pub fn new() -> Self {
        let (auth, _) = watch::channel(None);
        Self {
            accounts: RwLock::new(HashMap::new()),
            current: RwLock::new(None),
            auth,
            silent: false,
            force_error: RwLock::new(None),
            sign_in_calls: AtomicUsize::new(0),
            sign_up_calls: AtomicUsize::new(0),
            sign_out_calls: AtomicUsize::new(0),
        }
    }

    /// Registers an account that `sign_in` will accept.
    pub fn with_account(self, email: impl Into<String>, password: impl Into<String>) -> Self {
        let email = email.into();
        let account = MockAccount {
            uid: format!("uid-{}", Uuid::new_v4().simple()),
            password: password.into(),
        };
        self.accounts.write().unwrap().insert(email, account);
        self
    }

    /// Suppresses the auth-state notification on successful calls.
    ///
    /// Tests then deliver it manually via
    /// [`emit_current_user`](MockIdentityProvider::emit_current_user) to
    /// exercise the call-result-before-notification arrival order.
    pub fn with_silent_calls(mut self) -> Self {
        self.silent = true;
        self
    }

    /// Forces all calls to return the specified error.
    pub fn with_error(self, error: IdentityError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }

    /// Clears the forced error and returns to normal operation.
    pub fn clear_error(&self) {
        *self.force_error.write().unwrap() = None;
    }

    /// Publishes the present signed-in state as a notification.
    pub fn emit_current_user(&self) {
        self.auth.send_replace(self.current.read().unwrap().clone());
    }

    /// True if an account is registered for this email.
    pub fn has_account(&self, email: &str) -> bool {
        self.accounts.read().unwrap().contains_key(email)
    }

    /// Number of `sign_in` calls observed.
    pub fn sign_in_calls(&self) -> usize {
        self.sign_in_calls.load(Ordering::SeqCst)
    }

    /// Number of `sign_up` calls observed.
    pub fn sign_up_calls(&self) -> usize {
        self.sign_up_calls.load(Ordering::SeqCst)
    }

    /// Number of `sign_out` calls observed.
    pub fn sign_out_calls(&self) -> usize {
        self.sign_out_calls.load(Ordering::SeqCst)
    }

    fn forced_error(&self) -> Option<IdentityError> {
        self.force_error.read().unwrap().clone()
    }

    fn settle(&self, user: Option<AuthenticatedUser>) {
        *self.current.write().unwrap() = user.clone();
        if !self.silent {
            self.auth.send_replace(user);
        }
    }
}

impl Default for MockIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, IdentityError> {
        self.sign_in_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = self.forced_error() {
            return Err(error);
        }

        let account = self
            .accounts
            .read()
            .unwrap()
            .get(email)
            .cloned()
            .ok_or(IdentityError::InvalidCredentials)?;
        if account.password != password {
            return Err(IdentityError::InvalidCredentials);
        }

        let user = AuthenticatedUser::new(
            UserId::new(account.uid.as_str()).unwrap(),
            email,
            format!("mock-token-{}", account.uid),
        );
        self.settle(Some(user.clone()));
        Ok(user)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, IdentityError> {
        self.sign_up_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = self.forced_error() {
            return Err(error);
        }

        if self.has_account(email) {
            return Err(IdentityError::EmailAlreadyInUse);
        }
        if password.len() < 6 {
            return Err(IdentityError::WeakPassword(
                "Password should be at least 6 characters".to_string(),
            ));
        }

        let account = MockAccount {
            uid: format!("uid-{}", Uuid::new_v4().simple()),
            password: password.to_string(),
        };
        self.accounts
            .write()
            .unwrap()
            .insert(email.to_string(), account.clone());

        let user = AuthenticatedUser::new(
            UserId::new(account.uid.as_str()).unwrap(),
            email,
            format!("mock-token-{}", account.uid),
        );
        self.settle(Some(user.clone()));
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = self.forced_error() {
            return Err(error);
        }

        self.settle(None);
        Ok(())
    }

    fn auth_state(&self) -> watch::Receiver<AuthState> {
        self.auth.subscribe()
    }
}
