//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - reqwest HTTP client for the LivePix platform (`LivePixApi`)
//! - an in-process mock of the platform for tests

pub mod livepix;

#[cfg(test)]
pub mod livepix_mock;
