//! Lookup provider error types.

use thiserror::Error;

/// Errors talking to the product-lookup provider.
///
/// Per-keyword failures are absorbed by the aggregator; these errors never
/// abort a request on their own.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Transport, auth, or HTTP-status failure (timeouts included).
    #[error("lookup provider unavailable: {message}")]
    Unavailable { message: String },

    /// Response received but not parseable into the expected shape.
    #[error("lookup provider returned a malformed response: {message}")]
    MalformedResponse { message: String },

    /// The query itself is unacceptable (e.g. code shorter than 7 digits).
    #[error("invalid lookup query '{query}': {reason}")]
    InvalidQuery { query: String, reason: &'static str },
}
