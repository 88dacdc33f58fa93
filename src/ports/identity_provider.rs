//! Identity provider port: credentials and the observable auth state.

use async_trait::async_trait;
use tokio::sync::watch;

use crate::domain::foundation::{AuthenticatedUser, IdentityError};

/// The auth state the identity service reports: the signed-in user, or
/// absence.
pub type AuthState = Option<AuthenticatedUser>;

/// Credential operations and the auth-state notification stream.
///
/// # Contract
///
/// Implementations must:
/// - Resolve `sign_in`/`sign_up` with the authenticated user on success and
///   an [`IdentityError`] carrying a human-readable message on failure
/// - Publish a new value on the [`auth_state`](IdentityProvider::auth_state)
///   channel after every successful sign-in, sign-up, and sign-out, so
///   observers receive the change notification *in addition to* the call
///   result (consumers must tolerate either arriving first)
/// - Make the channel's current value the live auth state at all times, so a
///   fresh subscriber observes the present state immediately
///
/// Dropping the receiver is the unsubscribe.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Signs in with an email/password credential.
    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, IdentityError>;

    /// Creates a new email/password credential and signs it in.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, IdentityError>;

    /// Signs the current user out.
    async fn sign_out(&self) -> Result<(), IdentityError>;

    /// Subscribes to auth-state notifications.
    ///
    /// The receiver's current value is the present auth state; every later
    /// change is observable via `changed()`.
    fn auth_state(&self) -> watch::Receiver<AuthState>;
}
