//! Messages command - list received donation messages

use anyhow::Result;
use colored::Colorize;
use livepix_core::{LivePixApi, Scope};

use super::{bearer_token, AuthArgs};
use crate::output::{self, format_amount};

pub async fn run(
    api: &dyn LivePixApi,
    auth: &AuthArgs,
    proof: Option<&str>,
    json: bool,
) -> Result<()> {
    let token = bearer_token(api, auth, Scope::Read).await?;
    let messages = api.messages(&token, proof).await?;

    if json {
        return output::print_json(&messages);
    }

    if messages.is_empty() {
        output::warning("No messages found.");
        return Ok(());
    }

    for message in &messages {
        let header = format!(
            "{} {} ({})",
            message.created_at.format("%Y-%m-%d %H:%M"),
            message.username.bold(),
            format_amount(message.amount, &message.currency)
        );
        if message.flagged {
            println!("{} {}", header, "[flagged]".red());
        } else {
            println!("{}", header);
        }
        println!("  {}", message.message);
        println!("  proof: {}", message.proof.dimmed());
        println!();
    }
    Ok(())
}
