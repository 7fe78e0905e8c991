//! Error types for Quickmark.

use std::time::Duration;
use thiserror::Error;

/// Bridge errors. The overlay never shows these; it degrades instead.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The search provider failed.
    #[error("Provider error: {0}")]
    Provider(String),

    /// The host did not answer in time.
    #[error("Host timeout after {duration:?}")]
    Timeout { duration: Duration },

    /// The host replied with a message of the wrong kind.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Channel communication error.
    #[error("Channel error: {0}")]
    Channel(String),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No config directory found.
    #[error("Config directory not found")]
    NoConfigDir,

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Invalid value for a known key.
    #[error("Invalid value for '{key}': {message}")]
    Invalid { key: &'static str, message: String },
}
