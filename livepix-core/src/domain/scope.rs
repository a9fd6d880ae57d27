//! OAuth2 scope presets
//!
//! The strings are part of the wire contract with the platform and are sent
//! to the token endpoint untouched.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::result::Error;

const CONTROLS: &str = "controls offline webhooks";

const WRITE: &str =
    "rewards:write payments:write messages:write subscriptions:write subscription-plans:write";

const READ: &str = "account:read wallet:read currencies:read rewards:read payments:read messages:read subscriptions:read subscription-plans:read";

const ALL: &str = "controls offline webhooks account:read wallet:read currencies:read rewards:read rewards:write payments:read payments:write messages:read messages:write subscriptions:read subscriptions:write subscription-plans:read subscription-plans:write";

/// Permission set requested in a client-credentials exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Control, offline and webhook permissions
    Controls,
    /// Every `*:write` permission
    Write,
    /// Every `*:read` permission
    #[default]
    Read,
    /// Union of every permission
    All,
}

impl Scope {
    /// All presets, in declaration order
    pub const ALL: [Scope; 4] = [Scope::Controls, Scope::Write, Scope::Read, Scope::All];

    /// The space-separated permission string sent to the token endpoint
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Controls => CONTROLS,
            Scope::Write => WRITE,
            Scope::Read => READ,
            Scope::All => ALL,
        }
    }

    /// Symbolic preset name
    pub fn name(&self) -> &'static str {
        match self {
            Scope::Controls => "controls",
            Scope::Write => "write",
            Scope::Read => "read",
            Scope::All => "all",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scope::ALL
            .into_iter()
            .find(|scope| scope.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                Error::validation(format!(
                    "unknown scope '{}' (expected controls, write, read or all)",
                    s
                ))
            })
    }
}
