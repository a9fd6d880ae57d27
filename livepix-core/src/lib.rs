//! LivePix Core - client library for the LivePix payment platform
//!
//! This crate follows a small hexagonal layout:
//!
//! - **domain**: records returned by the API (Account, Wallet, Payment, ...),
//!   scope presets, errors and argument checks
//! - **ports**: the [`LivePixApi`] trait
//! - **adapters**: the reqwest-backed [`LivePixClient`]
//! - **config**: endpoint configuration
//!
//! The free functions below are the simplest entry point. Each one builds a
//! client from [`ClientConfig::from_env`], performs exactly one request and
//! keeps nothing afterwards:
//!
//! ```rust,ignore
//! let token = livepix_core::get_access_token(&id, &secret, Some(Scope::All)).await?;
//! let wallet = livepix_core::get_wallet(&token.access_token).await?;
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;

pub use adapters::livepix::LivePixClient;
pub use config::ClientConfig;
pub use domain::result::{Error, Result};
pub use domain::{
    AccessToken, Account, Message, NewMessage, NewPayment, Payment, Redirect, Scope, Wallet,
    DEFAULT_CURRENCY, MIN_AMOUNT,
};
pub use ports::LivePixApi;

use domain::validation::{require, require_payment};

/// Exchange client credentials for an access token (`None` requests [`Scope::Read`])
pub async fn get_access_token(
    client_id: &str,
    client_secret: &str,
    scope: Option<Scope>,
) -> Result<AccessToken> {
    require(client_id, "client_id")?;
    require(client_secret, "client_secret")?;
    LivePixClient::from_env()?
        .get_access_token(client_id, client_secret, scope)
        .await
}

/// Fetch the account that owns the token
pub async fn get_account(access_token: &str) -> Result<Account> {
    require(access_token, "access_token")?;
    LivePixClient::from_env()?.get_account(access_token).await
}

/// Fetch wallet balances, one entry per currency
pub async fn get_wallet(access_token: &str) -> Result<Vec<Wallet>> {
    require(access_token, "access_token")?;
    LivePixClient::from_env()?.get_wallet(access_token).await
}

/// Fetch received payments, optionally filtered by reference
pub async fn get_payments(access_token: &str, reference: Option<&str>) -> Result<Vec<Payment>> {
    require(access_token, "access_token")?;
    LivePixClient::from_env()?
        .get_payments(access_token, reference)
        .await
}

/// Request a payment of `amount` centavos (minimum [`MIN_AMOUNT`]) in BRL
pub async fn set_payment(access_token: &str, amount: u64, redirect_url: &str) -> Result<Redirect> {
    require_payment(access_token, amount, redirect_url)?;
    LivePixClient::from_env()?
        .set_payment(access_token, amount, redirect_url)
        .await
}

/// Fetch received messages, optionally filtered by proof
pub async fn get_messages(access_token: &str, proof: Option<&str>) -> Result<Vec<Message>> {
    require(access_token, "access_token")?;
    LivePixClient::from_env()?
        .get_messages(access_token, proof)
        .await
}

/// Request a donation message of `amount` centavos (minimum [`MIN_AMOUNT`]) in BRL
pub async fn set_message(
    access_token: &str,
    amount: u64,
    username: &str,
    message: &str,
    redirect_url: &str,
) -> Result<Redirect> {
    require_payment(access_token, amount, redirect_url)?;
    require(username, "username")?;
    require(message, "message")?;
    LivePixClient::from_env()?
        .set_message(access_token, amount, username, message, redirect_url)
        .await
}
