//! Session snapshot and event reducer.
//!
//! The session is modeled as a fold over an ordered event log. Two event
//! sources feed it: auth-state notifications from the identity service, and
//! the begin/end of locally-invoked sign-in/sign-up/sign-out calls. A call
//! completion and the notification it triggers may arrive in either order;
//! the reducer applies whichever lands last, so consumers never need a
//! staleness check.

use crate::domain::foundation::AuthenticatedUser;

/// Discrete phases of the session lifecycle.
///
/// `Uninitialized` holds from construction until the first auth-state
/// notification arrives. An error is not a phase of its own: it is a
/// transient annotation on the snapshot, cleared when the next call starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    Uninitialized,
    Anonymous,
    Authenticating,
    Authenticated(AuthenticatedUser),
}

/// One entry in the session event log.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Auth-state notification: the identity service reports the current
    /// user, or absence. Fired on startup and after every sign-in/out.
    AuthChanged(Option<AuthenticatedUser>),

    /// A sign-in, sign-up, or sign-out call entered flight.
    CallStarted,

    /// The in-flight call resolved successfully. The user itself arrives via
    /// the accompanying `AuthChanged` notification, not here.
    CallCompleted,

    /// The in-flight call failed with a displayable message.
    CallFailed(String),
}

/// Snapshot of the session visible to the rest of the application.
#[derive(Debug, Clone)]
pub struct Session {
    user: Option<AuthenticatedUser>,
    loading: bool,
    last_error: Option<String>,
    initialized: bool,
}

impl Session {
    /// Creates the initial snapshot: no user, loading until the first
    /// auth-state notification arrives.
    pub fn new() -> Self {
        Self {
            user: None,
            loading: true,
            last_error: None,
            initialized: false,
        }
    }

    /// Applies one event and returns the next snapshot.
    pub fn apply(mut self, event: SessionEvent) -> Self {
        match event {
            SessionEvent::AuthChanged(user) => {
                self.user = user;
                self.loading = false;
                self.initialized = true;
            }
            SessionEvent::CallStarted => {
                self.loading = true;
                self.last_error = None;
            }
            SessionEvent::CallCompleted => {
                self.loading = false;
            }
            SessionEvent::CallFailed(message) => {
                self.loading = false;
                self.last_error = Some(message);
            }
        }
        self
    }

    /// The current user, if signed in.
    pub fn user(&self) -> Option<&AuthenticatedUser> {
        self.user.as_ref()
    }

    /// True while a call is in flight or before the first notification.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The most recent call failure, if it has not been superseded.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// True once signed in.
    pub fn is_authenticated(&self) -> bool {
        !self.loading && self.user.is_some()
    }

    /// The session phase derived from the snapshot.
    pub fn phase(&self) -> SessionPhase {
        if !self.initialized {
            SessionPhase::Uninitialized
        } else if self.loading {
            SessionPhase::Authenticating
        } else if let Some(user) = &self.user {
            SessionPhase::Authenticated(user.clone())
        } else {
            SessionPhase::Anonymous
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
