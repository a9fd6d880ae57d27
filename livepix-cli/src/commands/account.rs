//! Account command - show the account owning the credentials

use anyhow::Result;
use colored::Colorize;
use livepix_core::{LivePixApi, Scope};

use super::{bearer_token, AuthArgs};
use crate::output;

pub async fn run(api: &dyn LivePixApi, auth: &AuthArgs, json: bool) -> Result<()> {
    let token = bearer_token(api, auth, Scope::Read).await?;
    let account = api.account(&token).await?;

    if json {
        return output::print_json(&account);
    }

    let mut table = output::create_table();
    table.add_row(vec!["ID", &account.id]);
    table.add_row(vec!["Username", &account.username]);
    table.add_row(vec!["Display name", &account.display_name]);
    table.add_row(vec!["Email", account.email.as_deref().unwrap_or("-")]);
    table.add_row(vec!["Avatar", &account.avatar]);

    println!("{}", "Account".bold());
    println!("{}", table);
    Ok(())
}
