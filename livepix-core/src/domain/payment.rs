//! Payments, donation messages and checkout redirects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use super::amount::{deserialize_minor_units, DEFAULT_CURRENCY};

/// A completed payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    /// Proof token identifying the settled transaction
    pub proof: String,
    /// Reference token handed out when the payment was requested
    pub reference: String,
    /// Amount in minor units
    #[serde(deserialize_with = "deserialize_minor_units")]
    pub amount: u64,
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

/// A donation message: a payment sent together with a text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(flatten)]
    pub payment: Payment,
    /// Sender username
    pub username: String,
    pub message: String,
    /// Set by platform moderation
    #[serde(default)]
    pub flagged: bool,
}

impl std::ops::Deref for Message {
    type Target = Payment;

    fn deref(&self) -> &Payment {
        &self.payment
    }
}

/// Where to send the end user to complete a payment or message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Redirect {
    pub reference: String,
    pub redirect_url: Url,
}

/// Body of `POST /payments`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPayment {
    pub amount: u64,
    pub currency: &'static str,
    /// Sent exactly as the caller passed it
    pub redirect_url: String,
}

impl NewPayment {
    pub fn new(amount: u64, redirect_url: impl Into<String>) -> Self {
        Self {
            amount,
            currency: DEFAULT_CURRENCY,
            redirect_url: redirect_url.into(),
        }
    }
}

/// Body of `POST /messages`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    pub username: String,
    pub message: String,
    pub amount: u64,
    pub currency: &'static str,
    pub redirect_url: String,
}

impl NewMessage {
    pub fn new(
        amount: u64,
        username: impl Into<String>,
        message: impl Into<String>,
        redirect_url: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            message: message.into(),
            amount,
            currency: DEFAULT_CURRENCY,
            redirect_url: redirect_url.into(),
        }
    }
}
