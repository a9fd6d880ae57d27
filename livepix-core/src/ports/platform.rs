//! Payment platform port
//!
//! Defines the operations the rest of the code relies on, independent of the
//! HTTP client that performs them.

use async_trait::async_trait;

use crate::domain::result::Result;
use crate::domain::{AccessToken, Account, Message, Payment, Redirect, Scope, Wallet};

/// Operations offered by the LivePix platform.
///
/// Every method is a single stateless round trip. Implementations validate
/// their arguments before doing any I/O and never retry.
#[async_trait]
pub trait LivePixApi: Send + Sync {
    /// Exchange client credentials for an access token (`None` requests [`Scope::Read`])
    async fn access_token(
        &self,
        client_id: &str,
        client_secret: &str,
        scope: Option<Scope>,
    ) -> Result<AccessToken>;

    /// Account owning the token
    async fn account(&self, access_token: &str) -> Result<Account>;

    /// One balance entry per currency
    async fn wallet(&self, access_token: &str) -> Result<Vec<Wallet>>;

    /// Received payments, optionally filtered by reference
    async fn payments(&self, access_token: &str, reference: Option<&str>) -> Result<Vec<Payment>>;

    /// Request a payment of `amount` centavos in BRL
    async fn create_payment(
        &self,
        access_token: &str,
        amount: u64,
        redirect_url: &str,
    ) -> Result<Redirect>;

    /// Received messages, optionally filtered by proof
    async fn messages(&self, access_token: &str, proof: Option<&str>) -> Result<Vec<Message>>;

    /// Request a donation message of `amount` centavos in BRL
    async fn create_message(
        &self,
        access_token: &str,
        amount: u64,
        username: &str,
        message: &str,
        redirect_url: &str,
    ) -> Result<Redirect>;
}
