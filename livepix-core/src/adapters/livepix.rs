//! LivePix API client
//!
//! Handles the OAuth2 client-credentials exchange and the `/v2` resource API.
//! Every call is one outbound request: no retries, no token caching.
//!
//! API Documentation: https://docs.livepix.gg/api

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, trace};
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::config::ClientConfig;
use crate::domain::result::{Error, Result};
use crate::domain::validation::{non_empty, require, require_payment};
use crate::domain::{
    AccessToken, Account, Message, NewMessage, NewPayment, Payment, Redirect, Scope,
    TokenResponse, Wallet,
};
use crate::ports::LivePixApi;

const GRANT_TYPE: &str = "client_credentials";

/// LivePix API client
#[derive(Debug, Clone)]
pub struct LivePixClient {
    client: Client,
    config: ClientConfig,
}

impl LivePixClient {
    /// Create a client for the given endpoints
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Create a client using `LIVEPIX_TOKEN_URL` / `LIVEPIX_API_URL` when set,
    /// otherwise the production endpoints.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Create a client against custom endpoints (sandbox or mock server)
    pub fn with_base_urls(token_url: &str, api_base_url: &str) -> Result<Self> {
        Self::new(ClientConfig::new(token_url, api_base_url)?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Exchange client credentials for an access token.
    ///
    /// `scope` defaults to [`Scope::Read`].
    pub async fn get_access_token(
        &self,
        client_id: &str,
        client_secret: &str,
        scope: Option<Scope>,
    ) -> Result<AccessToken> {
        require(client_id, "client_id")?;
        require(client_secret, "client_secret")?;
        let scope = scope.unwrap_or_default();

        debug!("Requesting access token with scope '{}'", scope.name());
        let request = self.client.post(self.config.token_url.clone()).form(&[
            ("grant_type", GRANT_TYPE),
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("scope", scope.as_str()),
        ]);
        let response = self.send(request, "POST", "/oauth2/token").await?;

        let body = read_json(response, "token").await?;
        if !body.is_object() {
            return Err(Error::malformed("token response is not a JSON object"));
        }
        let raw: TokenResponse = from_json(body, "token")?;
        AccessToken::from_response(raw, Utc::now())
    }

    /// Fetch the account that owns the token
    pub async fn get_account(&self, access_token: &str) -> Result<Account> {
        self.get(access_token, "/account", None).await
    }

    /// Fetch wallet balances, one entry per currency
    pub async fn get_wallet(&self, access_token: &str) -> Result<Vec<Wallet>> {
        self.get(access_token, "/wallet", None).await
    }

    /// Fetch received payments, optionally only those with the given reference
    pub async fn get_payments(
        &self,
        access_token: &str,
        reference: Option<&str>,
    ) -> Result<Vec<Payment>> {
        let query = non_empty(reference).map(|r| ("reference", r));
        self.get(access_token, "/payments", query).await
    }

    /// Request a payment of `amount` centavos in BRL.
    ///
    /// The returned redirect sends the payer to the platform checkout.
    pub async fn set_payment(
        &self,
        access_token: &str,
        amount: u64,
        redirect_url: &str,
    ) -> Result<Redirect> {
        require_payment(access_token, amount, redirect_url)?;

        let body = NewPayment::new(amount, redirect_url);
        self.post(access_token, "/payments", &body).await
    }

    /// Fetch received messages, optionally only those with the given proof
    pub async fn get_messages(
        &self,
        access_token: &str,
        proof: Option<&str>,
    ) -> Result<Vec<Message>> {
        let query = non_empty(proof).map(|p| ("proof", p));
        self.get(access_token, "/messages", query).await
    }

    /// Request a donation message of `amount` centavos in BRL
    pub async fn set_message(
        &self,
        access_token: &str,
        amount: u64,
        username: &str,
        message: &str,
        redirect_url: &str,
    ) -> Result<Redirect> {
        require_payment(access_token, amount, redirect_url)?;
        require(username, "username")?;
        require(message, "message")?;

        let body = NewMessage::new(amount, username, message, redirect_url);
        self.post(access_token, "/messages", &body).await
    }

    /// Authenticated GET returning the unwrapped `data` payload
    async fn get<T: DeserializeOwned>(
        &self,
        access_token: &str,
        path: &str,
        query: Option<(&str, &str)>,
    ) -> Result<T> {
        require(access_token, "access_token")?;

        let mut request = self
            .client
            .get(self.config.resource_url(path))
            .bearer_auth(access_token)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(param) = query {
            request = request.query(&[param]);
        }

        let response = self.send(request, "GET", path).await?;
        unwrap_envelope(read_json(response, path).await?, path)
    }

    /// Authenticated JSON POST returning the unwrapped `data` payload
    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        access_token: &str,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = self
            .client
            .post(self.config.resource_url(path))
            .bearer_auth(access_token)
            .json(body);

        let response = self.send(request, "POST", path).await?;
        unwrap_envelope(read_json(response, path).await?, path)
    }

    async fn send(&self, request: RequestBuilder, method: &str, path: &str) -> Result<Response> {
        debug!("{} {}", method, path);
        let response = request.send().await.map_err(map_request_error)?;
        trace!("{} {} -> {}", method, path, response.status());
        check_response_status(response)
    }
}

/// Map request errors to user-friendly messages
fn map_request_error(error: reqwest::Error) -> Error {
    if error.is_timeout() {
        Error::Transport("request timed out".to_string())
    } else if error.is_connect() {
        Error::Transport("unable to connect to LivePix servers".to_string())
    } else {
        Error::Transport(format!("LivePix request failed: {}", error))
    }
}

/// Fail with the status code and reason phrase on any non-2xx response
fn check_response_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    Err(Error::Http {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("Unknown Status").to_string(),
    })
}

async fn read_json(response: Response, what: &str) -> Result<JsonValue> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| Error::Transport(format!("failed to read {} response: {}", what, e)))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| Error::malformed(format!("failed to parse {} response: {}", what, e)))
}

/// Every resource response is wrapped as `{ "data": ... }`. Only an object
/// carrying that key is accepted; a bare array or payload is malformed.
fn unwrap_envelope<T: DeserializeOwned>(body: JsonValue, what: &str) -> Result<T> {
    let data = match body {
        JsonValue::Object(mut map) => map.remove("data"),
        _ => None,
    }
    .ok_or_else(|| Error::malformed(format!("{} response is missing the `data` envelope", what)))?;
    from_json(data, what)
}

fn from_json<T: DeserializeOwned>(value: JsonValue, what: &str) -> Result<T> {
    serde_json::from_value(value)
        .map_err(|e| Error::malformed(format!("failed to parse {} response: {}", what, e)))
}

#[async_trait]
impl LivePixApi for LivePixClient {
    async fn access_token(
        &self,
        client_id: &str,
        client_secret: &str,
        scope: Option<Scope>,
    ) -> Result<AccessToken> {
        self.get_access_token(client_id, client_secret, scope).await
    }

    async fn account(&self, access_token: &str) -> Result<Account> {
        self.get_account(access_token).await
    }

    async fn wallet(&self, access_token: &str) -> Result<Vec<Wallet>> {
        self.get_wallet(access_token).await
    }

    async fn payments(&self, access_token: &str, reference: Option<&str>) -> Result<Vec<Payment>> {
        self.get_payments(access_token, reference).await
    }

    async fn create_payment(
        &self,
        access_token: &str,
        amount: u64,
        redirect_url: &str,
    ) -> Result<Redirect> {
        self.set_payment(access_token, amount, redirect_url).await
    }

    async fn messages(&self, access_token: &str, proof: Option<&str>) -> Result<Vec<Message>> {
        self.get_messages(access_token, proof).await
    }

    async fn create_message(
        &self,
        access_token: &str,
        amount: u64,
        username: &str,
        message: &str,
        redirect_url: &str,
    ) -> Result<Redirect> {
        self.set_message(access_token, amount, username, message, redirect_url)
            .await
    }
}

// =============================================================================
// Tests
// =============================================================================
