//! Error types for assassin

use thiserror::Error;

/// Errors surfaced by the chain client
#[derive(Debug, Error)]
pub enum Error {
    /// Local input check failed before any network call
    #[error("{0}")]
    Validation(String),

    /// Backend answered with a non-success status
    #[error("{message}")]
    Request {
        /// HTTP status code
        status: u16,
        /// Message from the body's `error` field, or a fallback
        message: String,
    },

    /// Request could not complete
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Chain does not form a single cycle over its participants
    #[error("chain integrity: {0}")]
    DataIntegrity(String),

    /// Text could not be parsed
    #[error("parse error: {0}")]
    Parse(String),

    /// Same action is already in flight
    #[error("{0} is already in progress")]
    Busy(&'static str),

    /// No chain has been generated yet
    #[error("Please generate a chain first")]
    NoChain,

    /// Invalid client configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether the error was raised locally, before contacting the backend
    pub const fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Busy(_) | Self::NoChain | Self::Config(_)
        )
    }
}

/// Result alias using the crate error
pub type Result<T> = std::result::Result<T, Error>;
