//! Per-request authentication state machine.
//!
//! [`Authenticator::authenticate`] looks at the raw `Authorization` header and
//! either leaves the request's [`SecurityContext`] empty or installs a
//! principal. It never rejects anything: route policy downstream decides what
//! an unauthenticated request may reach.

use std::sync::Arc;

use chrono::Utc;

use crate::{IdentityLookup, LookupError, SecurityContext, TokenCodec};

pub const BEARER_PREFIX: &str = "Bearer ";

/// Where evaluation of a single request stopped.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// The context already held a principal; nothing was done.
    AlreadyAuthenticated,
    /// No `Authorization` header.
    NoCredential,
    /// Header present but not `Bearer <token>`.
    MalformedHeader,
    /// Token unparseable, wrongly signed, or without a subject.
    NoSubject,
    /// Subject readable but the token failed validation (e.g. expired).
    InvalidToken,
    /// Token valid but its subject no longer resolves to an account.
    UnknownIdentity,
    /// Token valid but the identity store could not answer.
    LookupFailed,
    /// Principal installed.
    Authenticated,
}

impl AuthOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthOutcome::AlreadyAuthenticated => "already_authenticated",
            AuthOutcome::NoCredential => "no_credential",
            AuthOutcome::MalformedHeader => "malformed_header",
            AuthOutcome::NoSubject => "no_subject",
            AuthOutcome::InvalidToken => "invalid_token",
            AuthOutcome::UnknownIdentity => "unknown_identity",
            AuthOutcome::LookupFailed => "lookup_failed",
            AuthOutcome::Authenticated => "authenticated",
        }
    }
}

impl core::fmt::Display for AuthOutcome {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token of a `Bearer <token>` header value, if it has that shape.
pub fn bearer_token(header: &[u8]) -> Option<&str> {
    let header = std::str::from_utf8(header).ok()?;
    let token = header.strip_prefix(BEARER_PREFIX)?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

#[derive(Clone)]
pub struct Authenticator {
    codec: Arc<TokenCodec>,
    identities: Arc<dyn IdentityLookup>,
}

impl Authenticator {
    pub fn new(codec: Arc<TokenCodec>, identities: Arc<dyn IdentityLookup>) -> Self {
        Self { codec, identities }
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Evaluate one request's credentials against `ctx`.
    ///
    /// The identity store is only consulted for tokens that passed signature
    /// and expiry checks. The principal is written after the lookup completes,
    /// so dropping this future midway leaves `ctx` untouched.
    pub async fn authenticate(
        &self,
        authorization: Option<&[u8]>,
        ctx: &mut SecurityContext,
    ) -> AuthOutcome {
        let outcome = self.evaluate(authorization, ctx).await;
        tracing::debug!(outcome = outcome.as_str(), "request authentication");
        outcome
    }

    async fn evaluate(
        &self,
        authorization: Option<&[u8]>,
        ctx: &mut SecurityContext,
    ) -> AuthOutcome {
        if ctx.is_authenticated() {
            return AuthOutcome::AlreadyAuthenticated;
        }

        let Some(header) = authorization else {
            return AuthOutcome::NoCredential;
        };
        let Some(token) = bearer_token(header) else {
            return AuthOutcome::MalformedHeader;
        };

        let subject = match self.codec.extract_subject(token) {
            Ok(subject) => subject,
            Err(e) => {
                tracing::debug!(error = %e, "bearer token has no usable subject");
                return AuthOutcome::NoSubject;
            }
        };

        if let Err(e) = self.codec.verify_at(token, Utc::now()) {
            tracing::debug!(error = %e, "bearer token rejected");
            return AuthOutcome::InvalidToken;
        }

        let principal = match self.identities.resolve(&subject).await {
            Ok(principal) => principal,
            Err(LookupError::IdentityNotFound(_)) => {
                tracing::debug!(username = %subject, "token subject does not resolve");
                return AuthOutcome::UnknownIdentity;
            }
            Err(e @ LookupError::Backend(_)) => {
                tracing::warn!(username = %subject, error = %e, "identity lookup failed");
                return AuthOutcome::LookupFailed;
            }
        };

        match ctx.authenticate(principal) {
            Ok(()) => AuthOutcome::Authenticated,
            Err(_) => AuthOutcome::AlreadyAuthenticated,
        }
    }
}
