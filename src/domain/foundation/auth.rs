//! Authentication types for the domain layer.
//!
//! These types represent the signed-in user as observed from the identity
//! service. They have **no vendor dependencies** - any credential provider
//! can populate them through the `IdentityProvider` port.

use super::UserId;
use thiserror::Error;

/// The signed-in user as reported by the identity service.
///
/// This is a **domain type** with no provider dependencies. The `id_token`
/// is the short-lived credential the document store accepts as proof of
/// identity for per-user document access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The unique user identifier from the identity service.
    pub id: UserId,

    /// Email address the account was created with.
    pub email: String,

    /// Bearer credential for document-store calls made on this user's behalf.
    pub id_token: String,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    ///
    /// Typically called by an `IdentityProvider` adapter after a successful
    /// sign-in or sign-up.
    pub fn new(id: UserId, email: impl Into<String>, id_token: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            id_token: id_token.into(),
        }
    }
}

/// Identity-service failures, from the application's perspective.
///
/// Every variant renders to the human-readable message shown inline in the
/// sign-in and sign-up forms, so `Display` text is part of the contract.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// The email/password pair was rejected.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// An account already exists for this email address.
    #[error("Email already in use")]
    EmailAlreadyInUse,

    /// The identity service rejected the password as too weak.
    #[error("Weak password: {0}")]
    WeakPassword(String),

    /// The identity service could not be reached.
    #[error("Identity service unreachable: {0}")]
    Network(String),

    /// Any other identity-service failure, carrying the service's message.
    #[error("{0}")]
    Other(String),
}

impl IdentityError {
    /// Creates a network error with a message.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, IdentityError::Network(_))
    }
}
