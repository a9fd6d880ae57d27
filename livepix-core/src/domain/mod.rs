//! Core domain entities
//!
//! Plain records returned by or sent to the LivePix API, plus the
//! argument checks that run before any I/O.

mod account;
pub mod amount;
mod payment;
pub mod result;
mod scope;
mod token;
pub mod validation;
mod wallet;

pub use account::Account;
pub use amount::{DEFAULT_CURRENCY, MIN_AMOUNT};
pub use payment::{Message, NewMessage, NewPayment, Payment, Redirect};
pub use scope::Scope;
pub(crate) use token::TokenResponse;
pub use token::{AccessToken, BEARER};
pub use wallet::Wallet;
