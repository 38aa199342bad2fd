//! Error types for promfind.
//!
//! Defines the main error enum used throughout the crate.

use thiserror::Error;

/// Main error type for metric find query operations.
#[derive(Error, Debug)]
pub enum FindQueryError {
    /// The `metrics(...)` argument failed to compile as a regular expression.
    #[error("Pattern error: {0}")]
    Pattern(String),

    /// HTTP/connection failures talking to the Prometheus API.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The datasource answered, but with a failure status or a payload
    /// that does not decode to the endpoint's expected shape.
    #[error("Datasource error: {0}")]
    Datasource(String),

    /// Configuration errors (bad base URL, missing PROMETHEUS_URL, etc.)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FindQueryError {
    /// Creates a pattern error with the given message.
    pub fn pattern(msg: impl Into<String>) -> Self {
        Self::Pattern(msg.into())
    }

    /// Creates a transport error with the given message.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Creates a datasource error with the given message.
    pub fn datasource(msg: impl Into<String>) -> Self {
        Self::Datasource(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Pattern(_) => "Pattern Error",
            Self::Transport(_) => "Transport Error",
            Self::Datasource(_) => "Datasource Error",
            Self::Config(_) => "Configuration Error",
        }
    }
}

/// Result type alias using FindQueryError.
pub type Result<T> = std::result::Result<T, FindQueryError>;
