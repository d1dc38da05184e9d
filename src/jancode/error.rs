//! JAN code error types.

use thiserror::Error;

/// Errors from JAN code normalization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JanCodeError {
    /// Input could not be normalized to a 13-digit code
    /// (no digits at all, or more than 13 of them).
    #[error("cannot format '{code}' as a 13-digit JAN code")]
    InvalidFormat { code: String },
}
