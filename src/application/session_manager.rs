//! SessionManager - owns the signed-in state for the whole application.
//!
//! One instance is created at startup, injected wherever the current user is
//! needed, started once, and stopped at teardown. Page views subscribe via
//! [`watch`](SessionManager::watch) and render from the [`Session`] snapshot.
//!
//! Every identity or store failure is caught here and converted into the
//! snapshot's error message; nothing propagates to callers and nothing is
//! retried automatically.

use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::domain::foundation::{AuthenticatedUser, Timestamp};
use crate::domain::preferences::UserProfile;
use crate::domain::session::{Session, SessionEvent};
use crate::ports::{IdentityProvider, ProfileStore};

/// Owns the current-user state and the credential operations that change it.
pub struct SessionManager {
    identity: Arc<dyn IdentityProvider>,
    profiles: Arc<dyn ProfileStore>,
    state: watch::Sender<Session>,
    listener: Mutex<Option<JoinHandle<()>>>,
}

impl SessionManager {
    /// Creates a manager in the uninitialized state. Call
    /// [`start`](SessionManager::start) to subscribe to auth notifications.
    pub fn new(identity: Arc<dyn IdentityProvider>, profiles: Arc<dyn ProfileStore>) -> Self {
        let (state, _) = watch::channel(Session::new());
        Self {
            identity,
            profiles,
            state,
            listener: Mutex::new(None),
        }
    }

    /// Subscribes to the identity service's auth-state notifications.
    ///
    /// The subscription delivers the present state immediately and every
    /// change afterwards. On each notification carrying a user, the user's
    /// profile document is created if it does not exist yet; the check runs
    /// on every notification and is idempotent. Calling `start` again
    /// replaces the previous subscription.
    pub fn start(&self) {
        let mut rx = self.identity.auth_state();
        let state = self.state.clone();
        let profiles = Arc::clone(&self.profiles);

        let handle = tokio::spawn(async move {
            loop {
                let auth = rx.borrow_and_update().clone();
                debug!(signed_in = auth.is_some(), "auth state notification");
                dispatch(&state, SessionEvent::AuthChanged(auth.clone()));
                if let Some(user) = auth {
                    ensure_profile(profiles.as_ref(), &user).await;
                }
                if rx.changed().await.is_err() {
                    break;
                }
            }
        });

        if let Some(previous) = self.listener.lock().unwrap().replace(handle) {
            previous.abort();
        }
    }

    /// Releases the auth-state subscription.
    pub fn stop(&self) {
        if let Some(handle) = self.listener.lock().unwrap().take() {
            handle.abort();
        }
    }

    /// Subscribes to session snapshots.
    pub fn watch(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// The current session snapshot.
    pub fn session(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Attempts credential sign-in.
    ///
    /// Returns true on success. On failure the error message lands in the
    /// session snapshot and false is returned; the user must resubmit.
    pub async fn login(&self, email: &str, password: &str) -> bool {
        dispatch(&self.state, SessionEvent::CallStarted);

        match self.identity.sign_in(email, password).await {
            Ok(user) => {
                info!(user = %user.id, "login succeeded");
                dispatch(&self.state, SessionEvent::CallCompleted);
                true
            }
            Err(err) => {
                error!(error = %err, "login failed");
                dispatch(&self.state, SessionEvent::CallFailed(err.to_string()));
                false
            }
        }
    }

    /// Creates a new account, then its profile document with no topics.
    ///
    /// If the profile write fails after the credential was created, the
    /// credential is not rolled back; the failure is surfaced like any other
    /// and the next sign-in's ensure-profile pass will fill the gap.
    pub async fn register(&self, email: &str, password: &str) -> bool {
        dispatch(&self.state, SessionEvent::CallStarted);

        let user = match self.identity.sign_up(email, password).await {
            Ok(user) => user,
            Err(err) => {
                error!(error = %err, "registration failed");
                dispatch(&self.state, SessionEvent::CallFailed(err.to_string()));
                return false;
            }
        };

        let profile = UserProfile::new(user.email.clone(), Timestamp::now());
        if let Err(err) = self.profiles.create(&user.id, &profile).await {
            error!(user = %user.id, error = %err, "profile creation after signup failed");
            dispatch(&self.state, SessionEvent::CallFailed(err.to_string()));
            return false;
        }

        info!(user = %user.id, "registration succeeded");
        dispatch(&self.state, SessionEvent::CallCompleted);
        true
    }

    /// Signs the current user out. The snapshot returns to anonymous via the
    /// sign-out notification; failures surface as the error message.
    pub async fn logout(&self) {
        dispatch(&self.state, SessionEvent::CallStarted);

        match self.identity.sign_out().await {
            Ok(()) => {
                info!("logout succeeded");
                dispatch(&self.state, SessionEvent::CallCompleted);
            }
            Err(err) => {
                error!(error = %err, "logout failed");
                dispatch(&self.state, SessionEvent::CallFailed(err.to_string()));
            }
        }
    }
}

impl Drop for SessionManager {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Applies one event to the shared snapshot.
fn dispatch(state: &watch::Sender<Session>, event: SessionEvent) {
    state.send_modify(|session| *session = session.clone().apply(event));
}

/// Creates the user's profile document if it does not exist yet.
///
/// Existence is checked first, so running this on every notification is
/// safe. Store failures are logged and swallowed: a missing profile repairs
/// itself on the next notification, and the session itself is unaffected.
async fn ensure_profile(profiles: &dyn ProfileStore, user: &AuthenticatedUser) {
    match profiles.find(&user.id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            let profile = UserProfile::new(user.email.clone(), Timestamp::now());
            match profiles.create(&user.id, &profile).await {
                Ok(()) => info!(user = %user.id, "created profile document"),
                Err(err) => warn!(user = %user.id, error = %err, "profile creation failed"),
            }
        }
        Err(err) => warn!(user = %user.id, error = %err, "profile lookup failed"),
    }
}
