//! Argument checks performed before any request is sent

use url::Url;

use super::amount::MIN_AMOUNT;
use super::result::{Error, Result};

/// Reject an empty required string argument
pub fn require(value: &str, name: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::validation(format!("{} is required", name)));
    }
    Ok(())
}

/// Reject amounts below the platform minimum
pub fn require_amount(amount: u64) -> Result<()> {
    if amount < MIN_AMOUNT {
        return Err(Error::validation(format!(
            "amount must be >= {} (got {})",
            MIN_AMOUNT, amount
        )));
    }
    Ok(())
}

/// Reject anything that does not parse as an absolute URL.
///
/// Only a check: the caller's string is what goes on the wire.
pub fn require_url(redirect_url: &str) -> Result<()> {
    Url::parse(redirect_url)
        .map(|_| ())
        .map_err(|e| Error::validation(format!("redirectUrl must be valid: {}", e)))
}

/// Checks shared by payment and message requests
pub fn require_payment(access_token: &str, amount: u64, redirect_url: &str) -> Result<()> {
    require(access_token, "access_token")?;
    require_amount(amount)?;
    require_url(redirect_url)
}

/// Treat an empty filter value the same as no filter
pub fn non_empty(filter: Option<&str>) -> Option<&str> {
    filter.filter(|v| !v.is_empty())
}
