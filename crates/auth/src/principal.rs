use core::fmt;

use studentapp_core::UserId;

use crate::Authority;

/// A user account as seen by the auth layer.
///
/// Owned by the user store; the auth core only ever reads it.
#[derive(Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    /// Unique, case-sensitive.
    pub username: String,
    /// Opaque PHC string produced by the credential hasher.
    pub password_hash: String,
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("user_id", &self.user_id)
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// The resolved identity plus its authorities, installed into the request's
/// [`SecurityContext`](crate::SecurityContext) once a token checks out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub identity: Identity,
    pub authorities: Vec<Authority>,
}

impl Principal {
    pub fn new(identity: Identity, authorities: Vec<Authority>) -> Self {
        Self {
            identity,
            authorities,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.identity.user_id
    }

    pub fn username(&self) -> &str {
        &self.identity.username
    }

    pub fn has_authority(&self, authority: &Authority) -> bool {
        self.authorities.contains(authority)
    }
}
