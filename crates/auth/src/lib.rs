//! `studentapp-auth` — stateless bearer-token authentication.
//!
//! Token issuance and validation, the identity-lookup contract, and the
//! per-request state machine that fills a request's [`SecurityContext`].
//! Decoupled from HTTP: the API crate feeds it raw header bytes.

pub mod authority;
pub mod claims;
pub mod codec;
pub mod config;
pub mod context;
pub mod credentials;
pub mod error;
pub mod interceptor;
pub mod lookup;
pub mod principal;
pub mod store;

pub use authority::Authority;
pub use claims::{TokenClaims, TokenValidationError, validate_claims};
pub use codec::TokenCodec;
pub use config::{AuthConfig, ConfigError, SigningSecret};
pub use context::{ContextError, SecurityContext};
pub use credentials::{CredentialError, CredentialVerifier, hash_password, verify_password};
pub use error::TokenError;
pub use interceptor::{AuthOutcome, Authenticator, bearer_token};
pub use lookup::{IdentityLookup, LookupError};
pub use principal::{Identity, Principal};
pub use store::{InMemoryUserStore, NewUser};
