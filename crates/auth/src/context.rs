use thiserror::Error;

use crate::Principal;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContextError {
    #[error("security context already holds a principal")]
    AlreadyAuthenticated,
}

/// Request-scoped holder of the authenticated principal, if any.
///
/// Created empty for every request and written at most once. It is carried
/// by value through the request (never a global), so concurrent requests
/// cannot observe each other's principals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecurityContext {
    principal: Option<Principal>,
}

impl SecurityContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    /// Install the principal for this request. A second write is refused and
    /// leaves the first principal in place.
    pub fn authenticate(&mut self, principal: Principal) -> Result<(), ContextError> {
        if self.principal.is_some() {
            return Err(ContextError::AlreadyAuthenticated);
        }
        self.principal = Some(principal);
        Ok(())
    }
}
