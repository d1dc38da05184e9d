//! Generative vision-model integration (OpenAI chat completions).
//!
//! Three capabilities share one provider: keyword generation, candidate
//! filtering, and direct JAN-code estimation. The provider is an untrusted
//! text channel; every response is schema-validated before use.

pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod openai;
pub mod prompts;

#[cfg(test)]
mod tests;

pub use error::VisionError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockVisionModel;
pub use openai::OpenAiVisionModel;

use crate::lookup::ProductRecord;

/// Outcome of a candidate-filtering call: the selected code numbers in rank
/// order plus the model's confidence in its top pick.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterVerdict {
    pub jancodes: Vec<String>,
    pub confidence: f64,
}

/// Generative-model capability.
///
/// One production implementation ([`OpenAiVisionModel`]) and one mock
/// (`MockVisionModel`, behind the `mock` feature).
pub trait VisionModel: Send + Sync {
    /// Proposes up to a handful of search keywords from the product name and
    /// image. Duplicates are permitted; downstream dedup is by code number.
    fn generate_keywords(
        &self,
        product_name: &str,
        image_url: &str,
    ) -> impl std::future::Future<Output = Result<Vec<String>, VisionError>> + Send;

    /// Selects and orders the pool subset that best matches the image/name.
    fn filter_candidates(
        &self,
        pool: &[ProductRecord],
        product_name: &str,
        image_url: &str,
    ) -> impl std::future::Future<Output = Result<FilterVerdict, VisionError>> + Send;

    /// Proposes JAN-code guesses from the image alone (no lookup grounding).
    fn estimate_codes(
        &self,
        product_name: &str,
        image_url: &str,
    ) -> impl std::future::Future<Output = Result<Vec<String>, VisionError>> + Send;
}
