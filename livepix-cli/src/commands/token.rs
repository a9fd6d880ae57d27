//! Token command - exchange client credentials for an access token

use anyhow::{Context, Result};
use colored::Colorize;
use livepix_core::{LivePixApi, Scope};

use super::AuthArgs;
use crate::output;

pub async fn run(api: &dyn LivePixApi, auth: &AuthArgs, json: bool) -> Result<()> {
    let client_id = auth
        .client_id
        .as_deref()
        .context("No credentials: pass --client-id or set LIVE_PIX_ID")?;
    let client_secret = super::client_secret(auth)?;
    let scope = auth.scope.unwrap_or(Scope::Read);

    let token = api
        .access_token(client_id, &client_secret, Some(scope))
        .await
        .context("Failed to obtain access token")?;

    if json {
        return output::print_json(&token);
    }

    let mut table = output::create_table();
    table.add_row(vec!["Access token", &token.access_token]);
    table.add_row(vec!["Type", &token.token_type]);
    table.add_row(vec!["Scope", &token.scope]);
    table.add_row(vec!["Expires", &token.expires_at.to_rfc3339()]);

    println!("{}", format!("Token ({} scope)", scope.name()).bold());
    println!("{}", table);
    Ok(())
}
