//! Client configuration
//!
//! Endpoints default to the production platform. Both can be overridden
//! through the environment to point the client at a sandbox or mock server:
//!
//! ```text
//! LIVEPIX_TOKEN_URL=http://127.0.0.1:8080/oauth2/token
//! LIVEPIX_API_URL=http://127.0.0.1:8080/v2
//! ```

use std::time::Duration;

use url::Url;

use crate::domain::result::{Error, Result};

/// Production OAuth2 token endpoint
pub const LIVEPIX_TOKEN_URL: &str = "https://oauth.livepix.gg/oauth2/token";

/// Production resource API base
pub const LIVEPIX_API_URL: &str = "https://api.livepix.gg/v2";

/// Environment variable overriding the token endpoint
pub const LIVEPIX_TOKEN_URL_ENV: &str = "LIVEPIX_TOKEN_URL";

/// Environment variable overriding the resource API base
pub const LIVEPIX_API_URL_ENV: &str = "LIVEPIX_API_URL";

/// Endpoints and transport settings for a [`crate::LivePixClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub token_url: Url,
    /// Resource base, stored without a trailing slash
    pub api_base_url: Url,
    /// Per-request deadline. `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            token_url: Url::parse(LIVEPIX_TOKEN_URL).expect("valid default token URL"),
            api_base_url: Url::parse(LIVEPIX_API_URL).expect("valid default API URL"),
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Build a config from explicit endpoints
    pub fn new(token_url: &str, api_base_url: &str) -> Result<Self> {
        let token_url = parse_endpoint(token_url, "token URL")?;
        let api_base_url = parse_endpoint(api_base_url.trim_end_matches('/'), "API URL")?;
        Ok(Self {
            token_url,
            api_base_url,
            timeout: None,
        })
    }

    /// Load endpoints from the environment, falling back to production
    pub fn from_env() -> Result<Self> {
        let token_url =
            std::env::var(LIVEPIX_TOKEN_URL_ENV).unwrap_or_else(|_| LIVEPIX_TOKEN_URL.to_string());
        let api_base_url =
            std::env::var(LIVEPIX_API_URL_ENV).unwrap_or_else(|_| LIVEPIX_API_URL.to_string());
        Self::new(&token_url, &api_base_url)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Full URL of a resource path such as `/payments`
    pub fn resource_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn parse_endpoint(value: &str, what: &str) -> Result<Url> {
    let url = Url::parse(value).map_err(|e| Error::config(format!("invalid {} '{}': {}", what, value, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::config(format!(
            "{} must use http or https, got '{}'",
            what, other
        ))),
    }
}
