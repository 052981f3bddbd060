//! Startup configuration for token signing.
//!
//! Both values are read once at process start. A bad value is fatal: callers
//! are expected to abort initialization on any [`ConfigError`].

use core::fmt;

use chrono::Duration;
use thiserror::Error;

/// Environment variable holding the HMAC signing secret.
pub const SECRET_ENV: &str = "STUDENTAPP_JWT_SECRET";

/// Environment variable holding the token lifetime, in seconds.
pub const LIFETIME_ENV: &str = "STUDENTAPP_JWT_LIFETIME_SECS";

/// Minimum accepted secret length in bytes (HS256 key size).
pub const MIN_SECRET_LEN: usize = 32;

/// One day.
pub const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 86_400;

/// Upper bound on the configured lifetime (one year).
const MAX_TOKEN_LIFETIME_SECS: i64 = 365 * 86_400;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    MissingSecret(&'static str),

    #[error("signing secret must be at least {min} bytes (got {actual})")]
    SecretTooShort { min: usize, actual: usize },

    #[error("invalid token lifetime: {0}")]
    InvalidLifetime(String),
}

/// HMAC signing secret.
///
/// Never printed: `Debug` is redacted and no error message carries the bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, ConfigError> {
        let bytes = bytes.into();
        if bytes.len() < MIN_SECRET_LEN {
            return Err(ConfigError::SecretTooShort {
                min: MIN_SECRET_LEN,
                actual: bytes.len(),
            });
        }
        Ok(Self(bytes))
    }

    pub(crate) fn expose(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret(<redacted>)")
    }
}

/// Configuration consumed by the token codec.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    secret: SigningSecret,
    token_lifetime: Duration,
}

impl AuthConfig {
    pub fn new(
        secret: impl Into<Vec<u8>>,
        token_lifetime: Duration,
    ) -> Result<Self, ConfigError> {
        let secret = SigningSecret::new(secret)?;
        check_lifetime_secs(token_lifetime.num_seconds())?;
        Ok(Self {
            secret,
            token_lifetime,
        })
    }

    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key/value source (used by `from_env` and tests).
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = get(SECRET_ENV)
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingSecret(SECRET_ENV))?;

        let secs = match get(LIFETIME_ENV) {
            Some(raw) => raw.trim().parse::<i64>().map_err(|e| {
                ConfigError::InvalidLifetime(format!("{LIFETIME_ENV}={raw:?}: {e}"))
            })?,
            None => DEFAULT_TOKEN_LIFETIME_SECS,
        };
        // Checked before building the Duration, which panics on overflow.
        check_lifetime_secs(secs)?;

        Self::new(secret.into_bytes(), Duration::seconds(secs))
    }

    pub fn secret(&self) -> &SigningSecret {
        &self.secret
    }

    pub fn token_lifetime(&self) -> Duration {
        self.token_lifetime
    }
}

fn check_lifetime_secs(secs: i64) -> Result<(), ConfigError> {
    if !(1..=MAX_TOKEN_LIFETIME_SECS).contains(&secs) {
        return Err(ConfigError::InvalidLifetime(format!(
            "{secs}s is outside 1..={MAX_TOKEN_LIFETIME_SECS}s"
        )));
    }
    Ok(())
}
