//! Final response assembly: a pure mapping from pipeline state to
//! [`EstimationResult`].

use std::collections::HashMap;

use crate::pipeline::filter::FilterOutcome;
use crate::pipeline::types::{EstimationRequest, EstimationResult};

/// Confidence reported when filtering failed and the raw pool is returned.
pub const UNFILTERED_CONFIDENCE: f64 = 0.5;

/// Confidence reported for direct image-only estimation.
pub const ESTIMATED_CONFIDENCE: f64 = 0.3;

pub(crate) const MSG_RANKED: &str = "JAN code estimated successfully.";

pub(crate) const MSG_UNFILTERED: &str = "Multiple JAN code candidates were found; \
model ranking was unavailable, so candidates are listed in search order.";

pub(crate) const MSG_ESTIMATED: &str = "JAN code candidates were estimated from the \
image alone; confidence is low because product lookup returned no matches.";

pub(crate) const MSG_EMPTY: &str = "No JAN code candidates could be determined. \
Provide a more specific product name or a clearer product image.";

pub(crate) fn assemble(
    outcome: FilterOutcome,
    request: &EstimationRequest,
    used_keywords: Vec<String>,
    keyword_hits: HashMap<String, u64>,
) -> EstimationResult {
    let (candidates, confidence, message) = match outcome {
        FilterOutcome::Ranked {
            candidates,
            confidence,
        } => (candidates, confidence, MSG_RANKED),
        FilterOutcome::Unfiltered { candidates } => {
            (candidates, UNFILTERED_CONFIDENCE, MSG_UNFILTERED)
        }
        FilterOutcome::Estimated { candidates } => {
            (candidates, ESTIMATED_CONFIDENCE, MSG_ESTIMATED)
        }
        FilterOutcome::Empty => (Vec::new(), 0.0, MSG_EMPTY),
    };

    let jancode = candidates.first().map(|c| c.code_number.clone());
    let product_name = candidates
        .first()
        .and_then(|c| c.item_name.clone())
        .or_else(|| Some(request.product_name.clone()));

    EstimationResult {
        jancode,
        product_name,
        candidates,
        confidence,
        message: message.to_string(),
        used_keywords,
        keyword_hits,
    }
}
