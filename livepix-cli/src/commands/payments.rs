//! Payments command - list received payments

use anyhow::Result;
use livepix_core::{LivePixApi, Scope};

use super::{bearer_token, AuthArgs};
use crate::output::{self, format_amount};

pub async fn run(
    api: &dyn LivePixApi,
    auth: &AuthArgs,
    reference: Option<&str>,
    json: bool,
) -> Result<()> {
    let token = bearer_token(api, auth, Scope::Read).await?;
    let payments = api.payments(&token, reference).await?;

    if json {
        return output::print_json(&payments);
    }

    if payments.is_empty() {
        output::warning("No payments found.");
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["Created", "Amount", "Reference", "Proof"]);
    for payment in &payments {
        table.add_row(vec![
            payment.created_at.format("%Y-%m-%d %H:%M").to_string(),
            format_amount(payment.amount, &payment.currency),
            payment.reference.clone(),
            payment.proof.clone(),
        ]);
    }

    println!("{}", table);
    println!("{} payment(s)", payments.len());
    Ok(())
}
