//! CLI command implementations

pub mod account;
pub mod create;
pub mod messages;
pub mod payments;
pub mod token;
pub mod wallet;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use dialoguer::Password;
use livepix_core::{ClientConfig, LivePixApi, LivePixClient, Scope};

/// Requests from the CLI give up after this long
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Credentials shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct AuthArgs {
    /// OAuth2 client id
    #[arg(long, env = "LIVE_PIX_ID", global = true)]
    pub client_id: Option<String>,

    /// OAuth2 client secret (prompted for when missing on a terminal)
    #[arg(long, env = "LIVE_PIX_SECRET", hide_env_values = true, global = true)]
    pub client_secret: Option<String>,

    /// Scope preset: controls, write, read or all
    #[arg(long, global = true)]
    pub scope: Option<Scope>,

    /// Use an existing access token instead of exchanging credentials
    #[arg(long, env = "LIVE_PIX_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,
}

/// Build the API client, honouring LIVEPIX_TOKEN_URL / LIVEPIX_API_URL
pub fn get_client() -> Result<Box<dyn LivePixApi>> {
    let config = ClientConfig::from_env()
        .context("Invalid LivePix endpoint configuration")?
        .with_timeout(REQUEST_TIMEOUT);
    let client = LivePixClient::new(config).context("Failed to initialize LivePix client")?;
    Ok(Box::new(client))
}

/// Resolve the bearer token for a command.
///
/// A `--token` wins; otherwise client credentials are exchanged with the
/// `--scope` given, falling back to `default_scope`.
pub async fn bearer_token(
    api: &dyn LivePixApi,
    auth: &AuthArgs,
    default_scope: Scope,
) -> Result<String> {
    if let Some(token) = auth.token.as_ref().filter(|t| !t.is_empty()) {
        return Ok(token.clone());
    }

    let client_id = auth
        .client_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .context("No credentials: pass --client-id or set LIVE_PIX_ID (or use --token)")?;
    let client_secret = client_secret(auth)?;

    let token = api
        .access_token(client_id, &client_secret, Some(auth.scope.unwrap_or(default_scope)))
        .await
        .context("Failed to obtain access token")?;
    log::debug!("Access token expires at {}", token.expires_at);
    Ok(token.access_token)
}

fn client_secret(auth: &AuthArgs) -> Result<String> {
    if let Some(secret) = auth.client_secret.as_ref().filter(|s| !s.is_empty()) {
        return Ok(secret.clone());
    }
    if !atty::is(atty::Stream::Stdin) {
        anyhow::bail!("No client secret: pass --client-secret or set LIVE_PIX_SECRET");
    }
    Password::new()
        .with_prompt("LivePix client secret")
        .interact()
        .context("Failed to read client secret")
}
