//! Wallet balances

use serde::{Deserialize, Serialize};

use super::amount::deserialize_minor_units;

/// Balances held in one currency. An account has one entry per currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    /// ISO 4217 currency code
    pub currency: String,
    /// Available balance in minor units
    #[serde(deserialize_with = "deserialize_minor_units")]
    pub balance: u64,
    #[serde(deserialize_with = "deserialize_minor_units")]
    pub balance_held: u64,
    #[serde(deserialize_with = "deserialize_minor_units")]
    pub balance_pending: u64,
}

impl Wallet {
    /// Sum of available, held and pending balances
    pub fn total(&self) -> u64 {
        self.balance
            .saturating_add(self.balance_held)
            .saturating_add(self.balance_pending)
    }
}
