use thiserror::Error;

use crate::TokenValidationError;

/// Failures of the token codec.
///
/// `Malformed`, `SignatureMismatch` and `MissingClaim` mean the token cannot be
/// trusted at all; `Claims` means it is authentic but outside its validity window.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("token signature does not match")]
    SignatureMismatch,

    #[error("token is missing the '{0}' claim")]
    MissingClaim(&'static str),

    #[error("token could not be signed: {0}")]
    Signing(String),

    #[error(transparent)]
    Claims(#[from] TokenValidationError),
}

impl TokenError {
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            TokenError::Malformed(_) | TokenError::SignatureMismatch | TokenError::MissingClaim(_)
        )
    }

    pub fn is_expired(&self) -> bool {
        matches!(self, TokenError::Claims(TokenValidationError::Expired))
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::InvalidSignature => TokenError::SignatureMismatch,
            _ => TokenError::Malformed(err.to_string()),
        }
    }
}
