//! Shared value objects used across the domain.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthenticatedUser, IdentityError};
pub use errors::ValidationError;
pub use ids::{TopicId, UserId};
pub use timestamp::Timestamp;
