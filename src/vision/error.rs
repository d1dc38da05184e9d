//! Vision provider error types.

use thiserror::Error;

/// Errors talking to the generative-model provider.
#[derive(Debug, Error)]
pub enum VisionError {
    /// Transport, auth, or HTTP-status failure (timeouts included).
    #[error("vision provider unavailable: {message}")]
    Unavailable { message: String },

    /// Response received but not parseable into the expected shape.
    #[error("vision provider returned malformed output: {message}")]
    MalformedOutput { message: String },
}
