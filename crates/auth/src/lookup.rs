use async_trait::async_trait;
use thiserror::Error;

use crate::Principal;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// No live account carries this username (never existed, or deleted).
    #[error("User not found with username: {0}")]
    IdentityNotFound(String),

    /// The backing store could not answer.
    #[error("identity store unavailable: {0}")]
    Backend(String),
}

/// Resolves a token subject to the principal installed for the request.
///
/// This is the only I/O the request interceptor performs, and it is only
/// reached for tokens that already passed signature and expiry checks.
#[async_trait]
pub trait IdentityLookup: Send + Sync {
    async fn resolve(&self, username: &str) -> Result<Principal, LookupError>;
}
