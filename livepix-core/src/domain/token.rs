//! OAuth2 access token

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::result::{Error, Result};

/// Token type every LivePix token must carry
pub const BEARER: &str = "bearer";

/// Raw token endpoint response
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    /// Lifetime in seconds, relative to the moment the response was produced
    pub expires_in: i64,
    pub scope: String,
    pub token_type: String,
}

/// An access token obtained through the client-credentials grant.
///
/// There is no refresh: callers request a new token once
/// [`AccessToken::is_expired`] returns true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    /// Absolute expiry instant, serialized as Unix milliseconds
    #[serde(rename = "expires_in", with = "chrono::serde::ts_milliseconds")]
    pub expires_at: DateTime<Utc>,
    pub scope: String,
    pub token_type: String,
}

impl AccessToken {
    /// Build a token from the endpoint response, anchoring the relative
    /// lifetime at `now`.
    pub(crate) fn from_response(raw: TokenResponse, now: DateTime<Utc>) -> Result<Self> {
        if raw.access_token.is_empty() {
            return Err(Error::malformed("token response has an empty access_token"));
        }
        if !raw.token_type.eq_ignore_ascii_case(BEARER) {
            return Err(Error::malformed(format!(
                "unexpected token_type '{}'",
                raw.token_type
            )));
        }
        let expires_at = Duration::try_seconds(raw.expires_in)
            .filter(|d| *d >= Duration::zero())
            .and_then(|d| now.checked_add_signed(d))
            .ok_or_else(|| {
                Error::malformed(format!("invalid expires_in {}", raw.expires_in))
            })?;

        Ok(Self {
            access_token: raw.access_token,
            expires_at,
            scope: raw.scope,
            token_type: raw.token_type.to_ascii_lowercase(),
        })
    }

    /// Whether the token is past its expiry instant
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Expiry as Unix milliseconds
    pub fn expires_at_millis(&self) -> i64 {
        self.expires_at.timestamp_millis()
    }

    /// Value for the `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.access_token
    }
}
