use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Capability tag attached to a resolved identity.
///
/// Every account currently receives the single [`Authority::USER`] tag; the
/// principal still carries a list so more tags can be granted later without
/// changing how principals are built or read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Authority(Cow<'static, str>);

impl Authority {
    /// Granted to every authenticated account.
    pub const USER: Authority = Authority(Cow::Borrowed("USER"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Authority {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
