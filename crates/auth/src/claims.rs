use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use studentapp_core::UserId;

use crate::{Identity, TokenError};

/// Claims carried by a bearer token.
///
/// `sub` is the username; the account id travels in the custom `userId`
/// claim so callers can recover it without a store lookup. Timestamps are
/// seconds since the Unix epoch, as in any JWT.
///
/// `sub` and `userId` are optional on the wire so that a correctly signed
/// token lacking them still decodes; the accessors report the gap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,

    pub iat: i64,

    pub exp: i64,
}

impl TokenClaims {
    pub fn for_identity(identity: &Identity, now: DateTime<Utc>, lifetime: Duration) -> Self {
        let iat = now.timestamp();
        Self {
            sub: Some(identity.username.clone()),
            user_id: Some(identity.user_id),
            iat,
            exp: iat + lifetime.num_seconds(),
        }
    }

    pub fn subject(&self) -> Result<&str, TokenError> {
        self.sub
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(TokenError::MissingClaim("sub"))
    }

    pub fn user_id(&self) -> Result<UserId, TokenError> {
        self.user_id.ok_or(TokenError::MissingClaim("userId"))
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("invalid token time window (exp <= iat)")]
    InvalidTimeWindow,
}

/// Check the claims' time window against `now`.
///
/// Claims only: signature verification happens in [`TokenCodec`](crate::TokenCodec)
/// before this is reached. Once `now` reaches `exp` the result stays `Expired`
/// for every later instant.
pub fn validate_claims(
    claims: &TokenClaims,
    now: DateTime<Utc>,
) -> Result<(), TokenValidationError> {
    if claims.exp <= claims.iat {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now.timestamp() >= claims.exp {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}
