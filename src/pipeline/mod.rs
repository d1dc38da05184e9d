//! Candidate-resolution pipeline.
//!
//! One request flows through keyword generation, concurrent fan-out
//! product search, dedup, and AI-assisted filtering (or direct estimation
//! when the pool is empty), then backfill and response assembly. Provider
//! failures degrade the result instead of aborting; [`Estimator::estimate`]
//! never returns an error.

mod aggregate;
mod assemble;
mod backfill;
mod filter;
pub mod types;


pub use assemble::{ESTIMATED_CONFIDENCE, UNFILTERED_CONFIDENCE};
pub use types::{EstimationRequest, EstimationResult};

use std::time::Duration;
use tracing::{info, instrument, warn};

use crate::config::Limits;
use crate::lookup::ProductLookup;
use crate::vision::VisionModel;

use aggregate::Aggregation;
use filter::FilterOutcome;

/// Drives the candidate-resolution pipeline over a vision model and a
/// product-lookup client. Request-scoped state only; one instance serves
/// all requests.
pub struct Estimator<V, L> {
    vision: V,
    lookup: L,
    limits: Limits,
    search_timeout: Duration,
}

impl<V, L> Estimator<V, L>
where
    V: VisionModel,
    L: ProductLookup,
{
    pub fn new(vision: V, lookup: L, limits: Limits, search_timeout: Duration) -> Self {
        Self {
            vision,
            lookup,
            limits,
            search_timeout,
        }
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Runs the full pipeline for one request.
    #[instrument(skip_all, fields(product_name = %request.product_name))]
    pub async fn estimate(&self, request: &EstimationRequest) -> EstimationResult {
        let keywords = self.generate_keywords(request).await;

        let aggregation = if keywords.is_empty() {
            Aggregation::default()
        } else {
            aggregate::collect_candidates(&self.lookup, &keywords, self.search_timeout).await
        };

        info!(
            keywords = keywords.len(),
            pool = aggregation.pool.len(),
            "candidate pool aggregated"
        );

        let outcome = filter::resolve_candidates(
            &self.vision,
            &aggregation.pool,
            request,
            self.limits,
        )
        .await;

        // Backfill only applies to the model-ranked path; the unfiltered
        // path already carries the pool, and direct estimation has no
        // backfill source.
        let outcome = match outcome {
            FilterOutcome::Ranked {
                candidates,
                confidence,
            } => FilterOutcome::Ranked {
                candidates: backfill::backfill(candidates, &aggregation.pool, self.limits),
                confidence,
            },
            other => other,
        };

        assemble::assemble(outcome, request, keywords, aggregation.keyword_hits)
    }

    /// Keyword generation; any provider failure degrades to an empty list,
    /// which sends the pipeline down the empty-pool path.
    async fn generate_keywords(&self, request: &EstimationRequest) -> Vec<String> {
        match self
            .vision
            .generate_keywords(&request.product_name, &request.product_image_url)
            .await
        {
            Ok(mut keywords) => {
                keywords.truncate(self.limits.max_keywords);
                keywords
            }
            Err(e) => {
                warn!(error = %e, "keyword generation failed, continuing without keywords");
                Vec::new()
            }
        }
    }
}
