//! In-memory account store.
//!
//! Stands in for the relational user table: it answers identity lookups for
//! the request interceptor and credential checks for the login flow.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use studentapp_core::{DomainError, DomainResult, UserId};

use crate::{
    Authority, CredentialError, CredentialVerifier, Identity, IdentityLookup, LookupError,
    Principal, credentials::verify_password,
};

const MAX_USERNAME_LEN: usize = 64;

/// Input for [`InMemoryUserStore::insert`]. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
struct UserRecord {
    identity: Identity,
    email: String,
}

#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    // Keyed by username (case-sensitive).
    users: RwLock<HashMap<String, UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account. Usernames are stored and matched exactly as given,
    /// so surrounding whitespace is rejected rather than trimmed. Emails are
    /// unique ignoring ASCII case.
    pub async fn insert(&self, new: NewUser) -> DomainResult<Identity> {
        let username = new.username.as_str();
        if username.trim().is_empty() {
            return Err(DomainError::validation("username must not be blank"));
        }
        if username.trim() != username {
            return Err(DomainError::validation(
                "username must not start or end with whitespace",
            ));
        }
        if username.chars().count() > MAX_USERNAME_LEN {
            return Err(DomainError::validation(format!(
                "username must be at most {MAX_USERNAME_LEN} characters"
            )));
        }
        let email = new.email.trim();
        if !email.contains('@') {
            return Err(DomainError::validation("email must be a valid address"));
        }

        let mut users = self.users.write().await;
        if users.contains_key(username) {
            return Err(DomainError::conflict("Username already exists"));
        }
        if users.values().any(|r| r.email.eq_ignore_ascii_case(email)) {
            return Err(DomainError::conflict("Email already exists"));
        }

        let identity = Identity {
            user_id: UserId::new(),
            username: username.to_string(),
            password_hash: new.password_hash,
        };
        users.insert(
            identity.username.clone(),
            UserRecord {
                identity: identity.clone(),
                email: email.to_string(),
            },
        );
        tracing::info!(
            user_id = %identity.user_id,
            username = %identity.username,
            "user registered"
        );
        Ok(identity)
    }

    pub async fn find_by_username(&self, username: &str) -> Option<Identity> {
        self.users
            .read()
            .await
            .get(username)
            .map(|r| r.identity.clone())
    }

    /// Remove an account. Tokens already issued for it stop resolving.
    pub async fn remove(&self, username: &str) -> Option<Identity> {
        self.users.write().await.remove(username).map(|r| r.identity)
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl IdentityLookup for InMemoryUserStore {
    async fn resolve(&self, username: &str) -> Result<Principal, LookupError> {
        let identity = self
            .find_by_username(username)
            .await
            .ok_or_else(|| LookupError::IdentityNotFound(username.to_string()))?;
        Ok(Principal::new(identity, vec![Authority::USER]))
    }
}

#[async_trait]
impl CredentialVerifier for InMemoryUserStore {
    async fn verify(&self, username: &str, password: &str) -> Result<Identity, CredentialError> {
        let identity = self
            .find_by_username(username)
            .await
            .ok_or(CredentialError::InvalidCredentials)?;

        let hash = identity.password_hash.clone();
        let password = password.to_owned();
        let matches = tokio::task::spawn_blocking(move || verify_password(&hash, &password))
            .await
            .map_err(|e| CredentialError::Backend(e.to_string()))?;

        if matches {
            Ok(identity)
        } else {
            Err(CredentialError::InvalidCredentials)
        }
    }
}
