//! Monetary amounts in minor units (centavos)

use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;

/// Smallest amount the platform accepts for a payment or message
pub const MIN_AMOUNT: u64 = 100;

/// The only currency this client creates payments in
pub const DEFAULT_CURRENCY: &str = "BRL";

/// Deserialize a non-negative amount that can be an integer, an integral
/// float or a numeric string
pub(crate) fn deserialize_minor_units<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let value: JsonValue = Deserialize::deserialize(deserializer)?;
    match value {
        JsonValue::Number(n) => {
            if let Some(v) = n.as_u64() {
                Ok(v)
            } else if let Some(f) = n
                .as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f < u64::MAX as f64)
            {
                Ok(f as u64)
            } else {
                Err(D::Error::custom(format!("invalid amount: {}", n)))
            }
        }
        JsonValue::String(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|e| D::Error::custom(format!("invalid amount '{}': {}", s, e))),
        _ => Err(D::Error::custom("expected number or string for amount")),
    }
}
