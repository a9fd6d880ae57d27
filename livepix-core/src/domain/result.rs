//! Result and error types for the core library

use thiserror::Error;

/// Core library error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An argument was rejected before any request was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// The platform answered with a non-success status
    #[error("{status} {reason}")]
    Http { status: u16, reason: String },

    /// The request never produced a response (connect failure, timeout, ...)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body was not JSON or did not have the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a malformed response error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// HTTP status code, if the platform answered with one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::MalformedResponse(e.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Self::Config(format!("invalid URL: {}", e))
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;
