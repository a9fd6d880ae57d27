//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. Callers depend only
//! on these traits, not on the HTTP adapter.

mod platform;

pub use platform::LivePixApi;
