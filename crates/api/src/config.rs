use std::net::SocketAddr;

use thiserror::Error;

use studentapp_auth::{AuthConfig, ConfigError};

pub const BIND_ADDR_ENV: &str = "STUDENTAPP_BIND_ADDR";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error)]
pub enum ServerConfigError {
    #[error(transparent)]
    Auth(#[from] ConfigError),

    #[error("invalid bind address {0:?}: {1}")]
    BindAddr(String, std::net::AddrParseError),
}

/// Everything the server needs at startup. Immutable afterwards.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub auth: AuthConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ServerConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(get: F) -> Result<Self, ServerConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw = get(BIND_ADDR_ENV).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw
            .parse()
            .map_err(|e| ServerConfigError::BindAddr(raw.clone(), e))?;
        let auth = AuthConfig::from_lookup(&get)?;
        Ok(Self { bind_addr, auth })
    }
}
