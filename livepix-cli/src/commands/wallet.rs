//! Wallet command - show balances per currency

use anyhow::Result;
use colored::Colorize;
use livepix_core::{LivePixApi, Scope};

use super::{bearer_token, AuthArgs};
use crate::output::{self, format_amount};

pub async fn run(api: &dyn LivePixApi, auth: &AuthArgs, json: bool) -> Result<()> {
    let token = bearer_token(api, auth, Scope::Read).await?;
    let wallet = api.wallet(&token).await?;

    if json {
        return output::print_json(&wallet);
    }

    if wallet.is_empty() {
        output::warning("Wallet is empty.");
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["Currency", "Available", "Held", "Pending"]);
    for entry in &wallet {
        table.add_row(vec![
            entry.currency.clone(),
            format_amount(entry.balance, &entry.currency),
            format_amount(entry.balance_held, &entry.currency),
            format_amount(entry.balance_pending, &entry.currency),
        ]);
    }

    println!("{}", "Wallet".bold());
    println!("{}", table);
    Ok(())
}
