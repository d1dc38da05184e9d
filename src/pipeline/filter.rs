//! AI-assisted candidate filtering, with direct estimation as the
//! empty-pool fallback.

use tracing::{debug, warn};

use crate::config::Limits;
use crate::jancode;
use crate::lookup::ProductRecord;
use crate::pipeline::types::EstimationRequest;
use crate::vision::VisionModel;

/// Where the final candidate list came from. Determines confidence and the
/// response message, and whether backfill applies.
#[derive(Debug)]
pub(crate) enum FilterOutcome {
    /// Model-ranked subset of the pool; confidence is model-reported.
    Ranked {
        candidates: Vec<ProductRecord>,
        confidence: f64,
    },

    /// Filtering failed or produced nothing usable; the pool is passed
    /// through in original order.
    Unfiltered { candidates: Vec<ProductRecord> },

    /// Empty pool; codes guessed directly from the image, checksum-vetted.
    Estimated { candidates: Vec<ProductRecord> },

    /// Nothing survived any source.
    Empty,
}

/// Filters a non-empty pool through the vision model, or falls back to
/// direct estimation when the pool is empty.
pub(crate) async fn resolve_candidates<V: VisionModel>(
    vision: &V,
    pool: &[ProductRecord],
    request: &EstimationRequest,
    limits: Limits,
) -> FilterOutcome {
    if pool.is_empty() {
        return estimate_directly(vision, request, limits).await;
    }

    let verdict = match vision
        .filter_candidates(pool, &request.product_name, &request.product_image_url)
        .await
    {
        Ok(verdict) => verdict,
        Err(e) => {
            warn!(error = %e, "candidate filtering failed, using unfiltered pool");
            return unfiltered(pool, limits);
        }
    };

    // The filter may only reference codes that exist in the pool; anything
    // else is dropped rather than fabricated into a record. Repeated codes
    // are kept once, at their first-ranked position.
    let mut candidates: Vec<ProductRecord> = Vec::new();
    for code in &verdict.jancodes {
        if candidates.len() >= limits.max_candidates {
            break;
        }
        if candidates.iter().any(|c| &c.code_number == code) {
            continue;
        }
        match pool.iter().find(|r| &r.code_number == code) {
            Some(record) => candidates.push(record.clone()),
            None => warn!(code, "filter referenced a code outside the pool, dropping"),
        }
    }

    if candidates.is_empty() {
        debug!("filter selected nothing from the pool, using unfiltered pool");
        return unfiltered(pool, limits);
    }

    FilterOutcome::Ranked {
        candidates,
        confidence: verdict.confidence.clamp(0.0, 1.0),
    }
}

fn unfiltered(pool: &[ProductRecord], limits: Limits) -> FilterOutcome {
    FilterOutcome::Unfiltered {
        candidates: pool.iter().take(limits.max_candidates).cloned().collect(),
    }
}

/// Direct JAN-code estimation from the image alone. Guesses that fail the
/// GTIN-13 checksum are discarded, not retried.
async fn estimate_directly<V: VisionModel>(
    vision: &V,
    request: &EstimationRequest,
    limits: Limits,
) -> FilterOutcome {
    let guesses = match vision
        .estimate_codes(&request.product_name, &request.product_image_url)
        .await
    {
        Ok(guesses) => guesses,
        Err(e) => {
            warn!(error = %e, "direct estimation failed");
            return FilterOutcome::Empty;
        }
    };

    let mut candidates: Vec<ProductRecord> = Vec::new();
    for code in guesses {
        if candidates.len() >= limits.max_candidates {
            break;
        }
        if !jancode::validate(&code) {
            debug!(code, "discarding estimated code with bad checksum");
            continue;
        }
        if candidates.iter().any(|c| c.code_number == code) {
            continue;
        }
        candidates.push(ProductRecord::synthetic(code));
    }

    if candidates.is_empty() {
        FilterOutcome::Empty
    } else {
        FilterOutcome::Estimated { candidates }
    }
}
