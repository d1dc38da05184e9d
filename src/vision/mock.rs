use std::sync::atomic::{AtomicUsize, Ordering};

use super::error::VisionError;
use super::{FilterVerdict, VisionModel};
use crate::lookup::ProductRecord;

/// Canned-response vision model for tests.
///
/// Defaults: an empty keyword list, a malformed filter verdict (so the
/// pipeline falls through to the unfiltered pool), and an empty estimate
/// list. Each capability can be overridden or forced to fail.
#[derive(Default)]
pub struct MockVisionModel {
    keywords: Vec<String>,
    keywords_unavailable: bool,
    verdict: Option<FilterVerdict>,
    filter_unavailable: bool,
    estimates: Vec<String>,
    estimates_unavailable: bool,
    keyword_calls: AtomicUsize,
    filter_calls: AtomicUsize,
    estimate_calls: AtomicUsize,
}

impl MockVisionModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keywords(mut self, keywords: &[&str]) -> Self {
        self.keywords = keywords.iter().map(|k| k.to_string()).collect();
        self
    }

    /// Makes `generate_keywords` return `Unavailable`.
    pub fn with_keyword_failure(mut self) -> Self {
        self.keywords_unavailable = true;
        self
    }

    pub fn with_verdict(mut self, jancodes: &[&str], confidence: f64) -> Self {
        self.verdict = Some(FilterVerdict {
            jancodes: jancodes.iter().map(|c| c.to_string()).collect(),
            confidence,
        });
        self
    }

    /// Makes `filter_candidates` return `Unavailable` instead of the
    /// default `MalformedOutput`.
    pub fn with_filter_failure(mut self) -> Self {
        self.filter_unavailable = true;
        self
    }

    pub fn with_estimates(mut self, jancodes: &[&str]) -> Self {
        self.estimates = jancodes.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Makes `estimate_codes` return `Unavailable`.
    pub fn with_estimate_failure(mut self) -> Self {
        self.estimates_unavailable = true;
        self
    }

    pub fn keyword_calls(&self) -> usize {
        self.keyword_calls.load(Ordering::SeqCst)
    }

    pub fn filter_calls(&self) -> usize {
        self.filter_calls.load(Ordering::SeqCst)
    }

    pub fn estimate_calls(&self) -> usize {
        self.estimate_calls.load(Ordering::SeqCst)
    }
}

// Arc delegation lets tests keep a handle for call-count assertions after
// handing the mock to an estimator.
impl VisionModel for std::sync::Arc<MockVisionModel> {
    async fn generate_keywords(
        &self,
        product_name: &str,
        image_url: &str,
    ) -> Result<Vec<String>, VisionError> {
        self.as_ref().generate_keywords(product_name, image_url).await
    }

    async fn filter_candidates(
        &self,
        pool: &[ProductRecord],
        product_name: &str,
        image_url: &str,
    ) -> Result<FilterVerdict, VisionError> {
        self.as_ref()
            .filter_candidates(pool, product_name, image_url)
            .await
    }

    async fn estimate_codes(
        &self,
        product_name: &str,
        image_url: &str,
    ) -> Result<Vec<String>, VisionError> {
        self.as_ref().estimate_codes(product_name, image_url).await
    }
}

impl VisionModel for MockVisionModel {
    async fn generate_keywords(
        &self,
        _product_name: &str,
        _image_url: &str,
    ) -> Result<Vec<String>, VisionError> {
        self.keyword_calls.fetch_add(1, Ordering::SeqCst);

        if self.keywords_unavailable {
            return Err(VisionError::Unavailable {
                message: "mock keyword failure".to_string(),
            });
        }

        Ok(self.keywords.clone())
    }

    async fn filter_candidates(
        &self,
        _pool: &[ProductRecord],
        _product_name: &str,
        _image_url: &str,
    ) -> Result<FilterVerdict, VisionError> {
        self.filter_calls.fetch_add(1, Ordering::SeqCst);

        if self.filter_unavailable {
            return Err(VisionError::Unavailable {
                message: "mock filter failure".to_string(),
            });
        }

        match &self.verdict {
            Some(verdict) => Ok(verdict.clone()),
            None => Err(VisionError::MalformedOutput {
                message: "mock verdict not configured".to_string(),
            }),
        }
    }

    async fn estimate_codes(
        &self,
        _product_name: &str,
        _image_url: &str,
    ) -> Result<Vec<String>, VisionError> {
        self.estimate_calls.fetch_add(1, Ordering::SeqCst);

        if self.estimates_unavailable {
            return Err(VisionError::Unavailable {
                message: "mock estimate failure".to_string(),
            });
        }

        Ok(self.estimates.clone())
    }
}
