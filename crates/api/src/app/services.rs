//! Shared, read-only service wiring handed to every request.

use std::sync::Arc;

use studentapp_auth::{AuthConfig, Authenticator, InMemoryUserStore, TokenCodec};

#[derive(Debug)]
pub struct AppServices {
    pub users: Arc<InMemoryUserStore>,
    pub codec: Arc<TokenCodec>,
}

impl AppServices {
    pub fn new(auth: &AuthConfig) -> Self {
        Self::with_store(auth, Arc::new(InMemoryUserStore::new()))
    }

    pub fn with_store(auth: &AuthConfig, users: Arc<InMemoryUserStore>) -> Self {
        Self {
            users,
            codec: Arc::new(TokenCodec::new(auth)),
        }
    }

    /// Interceptor bound to this codec and user store.
    pub fn authenticator(&self) -> Authenticator {
        Authenticator::new(self.codec.clone(), self.users.clone())
    }
}
