//! Pay and message commands - request a payment or a donation message

use anyhow::Result;
use livepix_core::{LivePixApi, Redirect, Scope};

use super::{bearer_token, AuthArgs};
use crate::output;

pub async fn run_payment(
    api: &dyn LivePixApi,
    auth: &AuthArgs,
    amount: u64,
    redirect_url: &str,
    json: bool,
) -> Result<()> {
    let token = bearer_token(api, auth, Scope::Write).await?;
    let redirect = api.create_payment(&token, amount, redirect_url).await?;
    print_redirect(&redirect, "Payment requested", json)
}

pub async fn run_message(
    api: &dyn LivePixApi,
    auth: &AuthArgs,
    amount: u64,
    username: &str,
    message: &str,
    redirect_url: &str,
    json: bool,
) -> Result<()> {
    let token = bearer_token(api, auth, Scope::Write).await?;
    let redirect = api
        .create_message(&token, amount, username, message, redirect_url)
        .await?;
    print_redirect(&redirect, "Message requested", json)
}

fn print_redirect(redirect: &Redirect, title: &str, json: bool) -> Result<()> {
    if json {
        return output::print_json(redirect);
    }
    output::success(title);
    println!("  Reference: {}", redirect.reference);
    println!("  Checkout:  {}", redirect.redirect_url);
    Ok(())
}
