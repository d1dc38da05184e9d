//! Configuration error types.

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Port value is outside valid range (1-65535).
    #[error("invalid port '{value}': must be between 1 and 65535")]
    InvalidPort { value: String },

    /// Port string could not be parsed as a number.
    #[error("failed to parse port '{value}': {source}")]
    PortParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Bind address string could not be parsed.
    #[error("failed to parse bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// A pipeline limit is out of its allowed range.
    #[error("invalid limit {name}={value}: {reason}")]
    InvalidLimit {
        name: &'static str,
        value: usize,
        reason: &'static str,
    },

    /// A provider timeout was configured as zero seconds.
    #[error("provider timeouts must be non-zero")]
    InvalidTimeout,
}
